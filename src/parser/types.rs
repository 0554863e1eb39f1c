//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Basic types (identifiers such as `long`)
//! - Sized array types (`long[3]`)
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers.

use std::collections::HashMap;

use crate::{
    ast::types::{ArrayTypeSyntax, TypeSyntax},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeSyntax, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, TypeSyntax, BindingPower) -> Result<TypeSyntax, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeSyntax, Error> {
    let identifier = parser.expect_identifier("in type position")?;
    Ok(TypeSyntax::Identifier(identifier))
}

pub fn parse_array_type(
    parser: &mut Parser,
    left: TypeSyntax,
    _bp: BindingPower,
) -> Result<TypeSyntax, Error> {
    let element = match left {
        TypeSyntax::Identifier(identifier) => identifier,
        TypeSyntax::Array(array) => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("array types take a single dimension"),
                },
                array.span.end,
            ))
        }
    };

    parser.expect(TokenKind::OpenBracket)?;

    let size_token = parser.expect(TokenKind::Number)?;
    let size = size_token.value.parse::<usize>().map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: size_token.value.clone(),
            },
            size_token.span.start.clone(),
        )
    })?;

    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeSyntax::Array(ArrayTypeSyntax {
        span: parser.span_from(element.span.start.clone()),
        element,
        size,
    }))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeSyntax, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_type_nud_lookup().get(&token_kind).copied() {
        Some(nud_fn) => nud_fn,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led_fn = match parser.get_type_led_lookup().get(&token_kind).copied() {
            Some(led_fn) => led_fn,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ))
            }
        };

        left = led_fn(parser, left, token_bp)?;
    }

    Ok(left)
}

use crate::{
    ast::{
        ast::{Expr, Identifier},
        expressions::{
            ArrayExpr, AssignmentExpr, BinaryExpr, CallExpr, LiteralExpr, LiteralValue, NameExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_nud_lookup().get(&token_kind).copied() {
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
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led_fn = match parser.get_led_lookup().get(&token_kind).copied() {
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

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let value = match token.kind {
        TokenKind::Number => parse_number(&token.value).ok_or_else(|| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            )
        })?,
        TokenKind::Identifier => {
            parser.advance();
            let identifier = Identifier {
                id: parser.advance_id(),
                name: token.value,
                span: token.span,
            };
            return Ok(Expr::Name(NameExpr {
                id: parser.advance_id(),
                identifier,
            }));
        }
        TokenKind::String => LiteralValue::String(token.value.clone()),
        TokenKind::Char => {
            let mut chars = token.value.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => LiteralValue::Char(ch),
                _ => {
                    return Err(Error::new(
                        ErrorImpl::UnexpectedTokenDetailed {
                            token: token.value.clone(),
                            message: String::from("char literal must hold exactly one character"),
                        },
                        token.span.start.clone(),
                    ))
                }
            }
        }
        TokenKind::True => LiteralValue::Boolean(true),
        TokenKind::False => LiteralValue::Boolean(false),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                token.span.start,
            ))
        }
    };

    parser.advance();

    Ok(Expr::Literal(LiteralExpr {
        id: parser.advance_id(),
        value,
        span: token.span,
    }))
}

/// Numbers with a fractional part are doubles, everything else is a long.
fn parse_number(value: &str) -> Option<LiteralValue> {
    if value.contains('.') {
        value.parse().ok().map(LiteralValue::Double)
    } else {
        value.parse().ok().map(LiteralValue::Long)
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        id: parser.advance_id(),
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        operator: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let identifier = match left {
        Expr::Name(name) => name.identifier,
        other => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("only a name can be assigned to"),
                },
                other.get_span().start.clone(),
            ))
        }
    };

    parser.advance();
    // Default binding power keeps `a = b = c` right associative
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Assignment(AssignmentExpr {
        id: parser.advance_id(),
        span: Span {
            start: identifier.span.start.clone(),
            end: value.get_span().end.clone(),
        },
        identifier,
        value: Box::new(value),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let identifier = match left {
        Expr::Name(name) => name.identifier,
        other => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("only named functions can be called"),
                },
                other.get_span().start.clone(),
            ))
        }
    };

    parser.advance();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        id: parser.advance_id(),
        span: parser.span_from(identifier.span.start.clone()),
        identifier,
        arguments,
    }))
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;

    Ok(Expr::Array(ArrayExpr {
        id: parser.advance_id(),
        elements,
        span: parser.span_from(start),
    }))
}

/// Comma separated expressions up to and including the `close` token.
fn parse_expr_list(parser: &mut Parser, close: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut items = vec![];

    while parser.current_token_kind() != close {
        items.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(close)?;

    Ok(items)
}

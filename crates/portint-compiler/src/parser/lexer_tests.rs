use super::lexer::{TokenKind, lex, token_text};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn operators_prefer_longest_match() {
    assert_eq!(
        kinds("<< <= < >> >= > == != ="),
        [
            TokenKind::Shl,
            TokenKind::Le,
            TokenKind::Lt,
            TokenKind::Shr,
            TokenKind::Ge,
            TokenKind::Gt,
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::Equals,
        ]
    );
}

#[test]
fn keyword_beats_identifier() {
    assert_eq!(
        kinds("let lettuce"),
        [TokenKind::KwLet, TokenKind::Ident]
    );
}

#[test]
fn literals_keep_suffix_in_one_token() {
    let source = "1_000u16 0xffu8 7";
    let tokens = lex(source);
    let texts: Vec<_> = tokens.iter().map(|t| token_text(source, t)).collect();
    assert_eq!(texts, ["1_000u16", "0xffu8", "7"]);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Int));
}

#[test]
fn trivia_is_dropped() {
    let source = "a // comment\n  + b";
    assert_eq!(
        kinds(source),
        [TokenKind::Ident, TokenKind::Plus, TokenKind::Ident]
    );
}

#[test]
fn comment_runs_to_end_of_input() {
    assert_eq!(kinds("a // b + c"), [TokenKind::Ident]);
    assert_eq!(kinds("a //\n// x\nb"), [TokenKind::Ident, TokenKind::Ident]);
}

#[test]
fn garbage_is_coalesced() {
    let source = "a $$$ b";
    let tokens = lex(source);
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].kind, TokenKind::Garbage);
    assert_eq!(token_text(source, &tokens[1]), "$$$");
}

#[test]
fn trailing_garbage() {
    let source = "a ##";
    let tokens = lex(source);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Garbage));
    assert_eq!(token_text(source, &tokens[1]), "##");
}

//! Flattener Tests
//!
//! Tests for argument flattening and token rendering.

use mcremote::protocol::{encode_request, flatten, flatten_all, flatten_with_depth, Arg, Request, Token};
use mcremote::{args, DelimiterPolicy, McError, Vec3};

fn ints(values: &[i64]) -> Vec<Token> {
    values.iter().map(|v| Token::Int(*v)).collect()
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn test_flatten_is_associative_over_nesting() {
    let left = Arg::list([Arg::Int(1), Arg::list([2, 3])]);
    let right = Arg::list([Arg::list([1, 2]), Arg::Int(3)]);

    assert_eq!(flatten(&left).unwrap(), ints(&[1, 2, 3]));
    assert_eq!(flatten(&right).unwrap(), ints(&[1, 2, 3]));
}

#[test]
fn test_flatten_vec3_matches_literal_sequence() {
    let v = Arg::list([Vec3::new(1.0, 2.0, 3.0)]);
    let literal = Arg::list([1.0, 2.0, 3.0]);

    let tokens = flatten(&v).unwrap();
    assert_eq!(tokens, flatten(&literal).unwrap());
    assert_eq!(
        tokens,
        vec![Token::Float(1.0), Token::Float(2.0), Token::Float(3.0)]
    );
}

#[test]
fn test_flatten_empty_list_vanishes() {
    let arg = Arg::list([Arg::Int(5), Arg::none(), Arg::Int(7)]);
    assert_eq!(flatten(&arg).unwrap(), ints(&[5, 7]));
}

#[test]
fn test_flatten_none_option_omits_argument() {
    let omitted: Option<i64> = None;
    let arg = Arg::list([Arg::from("getPos"), Arg::from(omitted), Arg::from(Some(9))]);

    assert_eq!(
        flatten(&arg).unwrap(),
        vec![Token::Str("getPos".to_string()), Token::Int(9)]
    );
}

#[test]
fn test_flatten_strings_are_atomic() {
    let arg = Arg::list(["STONE", "OAK_LOG"]);
    assert_eq!(
        flatten(&arg).unwrap(),
        vec![
            Token::Str("STONE".to_string()),
            Token::Str("OAK_LOG".to_string())
        ]
    );
}

#[test]
fn test_flatten_deep_nesting_within_limit() {
    let mut arg = Arg::Int(42);
    for _ in 0..200 {
        arg = Arg::List(vec![arg]);
    }
    assert_eq!(flatten(&arg).unwrap(), ints(&[42]));
}

#[test]
fn test_flatten_depth_limit_exceeded() {
    let mut arg = Arg::Int(1);
    for _ in 0..10 {
        arg = Arg::List(vec![arg]);
    }

    let err = flatten_with_depth(&arg, 5).unwrap_err();
    assert!(matches!(err, McError::Argument(_)));
}

#[test]
fn test_flatten_all_keeps_group_order() {
    let groups = args![7, Vec3::new(0.5, 64.0, -1.0), "PIG", Vec::<i64>::new(), [1, 2]];
    let tokens = flatten_all(&groups, 1000).unwrap();

    assert_eq!(
        tokens,
        vec![
            Token::Int(7),
            Token::Float(0.5),
            Token::Float(64.0),
            Token::Float(-1.0),
            Token::Str("PIG".to_string()),
            Token::Int(1),
            Token::Int(2),
        ]
    );
}

#[test]
fn test_tile_arg_floors_coordinates() {
    let arg = Arg::tile(Vec3::new(1.9, -0.1, -2.5));
    assert_eq!(flatten(&arg).unwrap(), ints(&[1, -1, -3]));
}

// =============================================================================
// Token Rendering
// =============================================================================

#[test]
fn test_token_rendering() {
    assert_eq!(Token::Int(-12).to_string(), "-12");
    assert_eq!(Token::Float(64.0).to_string(), "64.0");
    assert_eq!(Token::Float(0.1).to_string(), "0.1");
    assert_eq!(Token::Float(-2.5).to_string(), "-2.5");
    assert_eq!(Token::Bool(true).to_string(), "true");
    assert_eq!(Token::Str("STONE".to_string()).to_string(), "STONE");
}

#[test]
fn test_non_finite_floats_use_java_spelling() {
    assert_eq!(Token::Float(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(Token::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
    assert_eq!(Token::Float(f64::NAN).to_string(), "NaN");

    let request = Request::new("player.setPitch", &args![f64::INFINITY]).unwrap();
    let line = encode_request(&request, DelimiterPolicy::Substitute).unwrap();
    assert_eq!(line, b"player.setPitch(Infinity)\n");
}

#[test]
fn test_args_macro_empty() {
    let empty = args![];
    assert!(empty.is_empty());
}

#[test]
fn test_is_empty_list() {
    assert!(Arg::none().is_empty_list());
    assert!(!Arg::list([1]).is_empty_list());
    assert!(!Arg::Int(0).is_empty_list());
}

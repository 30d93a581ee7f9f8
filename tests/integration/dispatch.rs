//! Matching, option decoding and parameter binding through `execute`.

use super::test_utils::fixture_router;
use cmdrouter::{CommandRouter, ParseError, Param, RouterError, Value, ValueType};

#[test]
fn test_help_with_short_option() {
    let router = fixture_router();
    assert_eq!(
        router.execute("help test -p 1").unwrap(),
        "Show help info of command 'test'. (page: 1)"
    );
    assert_eq!(
        router.execute("help").unwrap(),
        "Show help info of command 'help'. (page: 1)"
    );
}

#[test]
fn test_option_order_independence() {
    let router = fixture_router();
    let expected = "test1 'param1 param2'. (page: 1, test1: test1, test2: test2)";
    for line in [
        "test1 --test2 test2 --test1 test1 -p 1 param1 param2",
        "test1 -t2 test2 -t1 test1 -p 1 param1 param2",
        "test1 -p 1 -t2 test2 -t1 test1 param1 param2",
        "test1 -p 1 -t1 test1 -t2 test2 param1 param2",
        "test1 -p 1 param1 param2 -t1 test1 -t2 test2",
        "test1 -p 1 param1 param2 -t2 test2 -t1 test1",
        "test1 param1 param2 -p 1 -t1 test1 -t2 test2",
        "test1 param1 -p 1 param2 -t1 test1 -t2 test2",
    ] {
        assert_eq!(router.execute(line).unwrap(), expected, "line: {}", line);
    }
}

#[test]
fn test_bool_option_long_short_and_absent() {
    let router = fixture_router();
    let set = "test2 'name'. (bool: true)";
    assert_eq!(router.execute("test2 name --bool").unwrap(), set);
    assert_eq!(router.execute("test2 -b name").unwrap(), set);
    assert_eq!(
        router.execute("test2 name").unwrap(),
        "test2 'name'. (bool: false)"
    );
    assert_eq!(
        router.execute("test2 -b").unwrap(),
        "test2 'test2'. (bool: true)"
    );
}

#[test]
fn test_longest_route_wins() {
    let router = fixture_router();
    let set = "parent/sub 'name'. (bool: true)";
    assert_eq!(router.execute("parent sub name --bool").unwrap(), set);
    assert_eq!(router.execute("parent sub -b name").unwrap(), set);
}

#[test]
fn test_longer_route_registered_after_shorter_still_wins() {
    let mut router: CommandRouter<&'static str> = CommandRouter::new();
    router
        .command("a")
        .param(Param::optional("x", ""))
        .param(Param::optional("y", ""))
        .register(|_| Ok("a"))
        .unwrap();
    router
        .command("a/b")
        .param(Param::optional("x", ""))
        .register(|_| Ok("a/b"))
        .unwrap();

    assert_eq!(router.execute("a b x").unwrap(), "a/b");
    assert_eq!(router.execute("a c x").unwrap(), "a");
    assert_eq!(router.execute("a").unwrap(), "a");
}

#[test]
fn test_quoted_parameter_is_one_token() {
    let router = fixture_router();
    assert_eq!(
        router.execute("test2 'two words' -b").unwrap(),
        "test2 'two words'. (bool: true)"
    );
    assert_eq!(
        router.execute(r#"test1 -t1 "a b" x"#).unwrap(),
        "test1 'x test2'. (page: 1, test1: a b, test2: )"
    );
}

#[test]
fn test_too_many_parameters() {
    let router = fixture_router();
    let err = router.execute("test2 one two").unwrap_err();
    assert_eq!(
        err.as_parse(),
        Some(&ParseError::TooManyParameters {
            route: "test2".to_string(),
            expected: 1,
            got: 2,
        })
    );
}

#[test]
fn test_fewer_parameters_use_defaults() {
    let router = fixture_router();
    assert_eq!(
        router.execute("test1 only").unwrap(),
        "test1 'only test2'. (page: 1, test1: , test2: )"
    );
}

#[test]
fn test_missing_option_value() {
    let router = fixture_router();
    let err = router.execute("test1 x -t1").unwrap_err();
    assert_eq!(
        err.as_parse(),
        Some(&ParseError::MissingOptionValue("test1".to_string()))
    );
}

#[test]
fn test_option_value_conversion_failure() {
    let router = fixture_router();
    let err = router.execute("help -p first").unwrap_err();
    assert!(matches!(
        err,
        RouterError::Parse(ParseError::InvalidValue {
            expected: ValueType::Int,
            ..
        })
    ));
}

#[test]
fn test_command_not_found() {
    let router = fixture_router();
    let err = router.execute("unknown thing").unwrap_err();
    assert_eq!(
        err.as_parse(),
        Some(&ParseError::CommandNotFound("unknown thing".to_string()))
    );
    // A route only matches whole tokens.
    assert!(router.execute("parents sub").is_err());
}

#[test]
fn test_option_not_bound_to_command_is_still_decoded() {
    let router = fixture_router();
    let resolved = router.resolve("test2 name -p 5").unwrap();
    assert_eq!(resolved.invocation.option("page"), Some(&Value::Int(5)));
    assert_eq!(resolved.command.route(), "test2");
}

#[test]
fn test_typed_parameters() {
    let mut router: CommandRouter<f64> = CommandRouter::new();
    router
        .command("scale")
        .param(Param::new("value", ValueType::Int))
        .param(Param::optional("factor", 1.5))
        .register(|inv| {
            let value = inv.param_int("value").unwrap_or_default() as f64;
            Ok(value * inv.param_float("factor").unwrap_or(1.0))
        })
        .unwrap();

    assert_eq!(router.execute("scale 2").unwrap(), 3.0);
    assert_eq!(router.execute("scale 2 0.5").unwrap(), 1.0);
    assert!(matches!(
        router.execute("scale").unwrap_err(),
        RouterError::Parse(ParseError::MissingParameter { .. })
    ));
    assert!(matches!(
        router.execute("scale two").unwrap_err(),
        RouterError::Parse(ParseError::InvalidValue { .. })
    ));
}

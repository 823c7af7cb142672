//! BDD step definitions for response validation feature

use cucumber::{given, then, when};

use review_bot::homework::{check_response, parse_status};
use review_bot::ValidationError;

use crate::world::ReviewBotWorld;

fn error_kind(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::WrongType(_) => "wrong type",
        ValidationError::MissingKey(_) => "missing key",
        ValidationError::EmptyHomeworks => "empty homeworks",
        ValidationError::MissingField(_) => "missing field",
        ValidationError::UnknownStatus(_) => "unknown status",
    }
}

#[given(expr = "an API response {string}")]
fn api_response(world: &mut ReviewBotWorld, body: String) {
    let value = serde_json::from_str(&body).expect("scenario body must be valid JSON");
    world.response = Some(value);
}

#[when("the response is validated")]
fn validate_response(world: &mut ReviewBotWorld) {
    let response = world.response.as_ref().expect("response not set");
    world.validation_result = Some(check_response(response).map(|homeworks| homeworks.len()));
}

#[when("the first homework is formatted")]
fn format_first_homework(world: &mut ReviewBotWorld) {
    let response = world.response.as_ref().expect("response not set");
    let homeworks = check_response(response).expect("response should validate");
    world.format_result = Some(parse_status(&homeworks[0]));
}

#[then(expr = "validation should succeed with {int} homework(s)")]
fn validation_succeeds(world: &mut ReviewBotWorld, count: usize) {
    let result = world.validation_result.as_ref().expect("no result");
    assert_eq!(result.as_ref().copied().unwrap(), count);
}

#[then(expr = "validation should fail with a {string} error")]
fn validation_fails(world: &mut ReviewBotWorld, kind: String) {
    let result = world.validation_result.as_ref().expect("no result");
    let err = result.as_ref().unwrap_err();
    assert_eq!(error_kind(err), kind, "unexpected error: {err}");
}

#[then(expr = "the message should be {string}")]
fn message_is(world: &mut ReviewBotWorld, expected: String) {
    let result = world.format_result.as_ref().expect("no result");
    assert_eq!(result.as_ref().unwrap(), &expected);
}

#[then(expr = "formatting should fail with a {string} error")]
fn formatting_fails(world: &mut ReviewBotWorld, kind: String) {
    let result = world.format_result.as_ref().expect("no result");
    let err = result.as_ref().unwrap_err();
    assert_eq!(error_kind(err), kind, "unexpected error: {err}");
}

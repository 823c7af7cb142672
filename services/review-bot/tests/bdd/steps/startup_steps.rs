//! BDD step definitions for startup feature

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use review_bot::io::{HttpClient, HttpResponse};
use review_bot::{Config, ReviewBotBuilder, ReviewBotError};

use crate::steps::poll_loop_steps::{ScriptedHttpClient, ENDPOINT, TELEGRAM_URL};
use crate::world::ReviewBotWorld;

fn scripted_http(world: &mut ReviewBotWorld) -> Arc<ScriptedHttpClient> {
    world
        .http
        .get_or_insert_with(|| Arc::new(ScriptedHttpClient::default()))
        .clone()
}

#[given(expr = "the environment variable {word} is set to {string}")]
fn env_set(world: &mut ReviewBotWorld, name: String, value: String) {
    world.env.insert(name, value);
}

#[given(expr = "the environment variable {word} is empty")]
fn env_empty(world: &mut ReviewBotWorld, name: String) {
    world.env.insert(name, String::new());
}

#[given(expr = "the homework service will reply with {string}")]
fn service_replies(world: &mut ReviewBotWorld, body: String) {
    scripted_http(world).push_reply(Ok(HttpResponse { status: 200, body }));
}

#[when("the bot starts")]
async fn bot_starts(world: &mut ReviewBotWorld) {
    let http = scripted_http(world);
    let cancel = CancellationToken::new();
    *http.drained.lock().unwrap() = Some(cancel.clone());

    let config = Config {
        endpoint: ENDPOINT.to_string(),
        telegram_api_url: TELEGRAM_URL.to_string(),
        ..Config::default()
    };
    let env = world.env.clone();

    let built = ReviewBotBuilder::new(config)
        .with_http_client(http as Arc<dyn HttpClient>)
        .with_env_lookup(move |name| env.get(name).cloned())
        .with_cancellation_token(cancel)
        .build();

    match built {
        Ok(bot) => {
            tokio::time::timeout(Duration::from_secs(5), bot.start())
                .await
                .expect("bot did not stop after the scripted replies ran out")
                .expect("bot failed while polling");
        }
        Err(e) => world.startup_error = Some(e),
    }
}

#[then(expr = "startup should fail naming {word}")]
fn startup_fails(world: &mut ReviewBotWorld, name: String) {
    let err = world.startup_error.as_ref().expect("startup did not fail");
    assert!(matches!(err, ReviewBotError::Config(_)), "{err:?}");
    assert!(err.to_string().contains(&name), "{err}");
}

#[then(expr = "the bot should have polled the homework service {int} time(s)")]
fn polled_times(world: &mut ReviewBotWorld, count: usize) {
    assert!(world.startup_error.is_none(), "{:?}", world.startup_error);
    let http = world.http.as_ref().expect("bot not started");
    assert_eq!(http.gets.lock().unwrap().len(), count);
}

#[then("no HTTP request should have been made")]
fn no_requests(world: &mut ReviewBotWorld) {
    let http = world.http.as_ref().expect("bot not started");
    assert_eq!(http.request_count(), 0);
}

//! End-to-end scenarios across the workspace crates.

use std::cell::Cell;
use std::time::Duration;

use thiserror::Error;
use tryflow::prelude::*;
use tryflow::{sequence, traverse, CancelSignal, TokioBackoff};

#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid config: {0}")]
struct ConfigError(String);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn parse_port(raw: &str) -> Try<u16> {
    Try::of(|| raw.parse::<u16>())
        .map_failure(|_| TryError::capture(ConfigError(format!("bad port {:?}", raw))))
        .filter_message(|port| *port != 0, "port must be non-zero")
}

#[test]
fn validation_chain_with_throw_if_true() {
    let check = |input: i64| throw_if_true(input < 0, || TryError::validation("negative"));

    assert_eq!(check(-1), Err(TryError::validation("negative")));
    assert_eq!(check(5), Ok(()));
}

#[test]
fn functor_law_on_success_and_failure() {
    let invoked = Cell::new(0);
    let f = |v: u16| {
        invoked.set(invoked.get() + 1);
        u32::from(v) * 2
    };

    assert_eq!(parse_port("80").map(f), Try::Success(160));
    assert_eq!(invoked.get(), 1);

    let failed = parse_port("eighty");
    let cause = failed.cause().cloned();
    assert_eq!(failed.map(f).cause().cloned(), cause);
    assert_eq!(invoked.get(), 1);
}

#[test]
fn captured_error_identity_survives_the_chain() {
    let result = parse_port("eighty")
        .map(|port| port + 1)
        .flat_map(|port| Try::success(port * 2))
        .filter(|_| true, "unused");

    assert!(result.is_failure_of::<ConfigError>());
    let err = result.or_throw().unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError("bad port \"eighty\"".to_string()))
    );
}

#[test]
fn recovery_is_total() {
    for cause in [TryError::NoMatch, TryError::MissingValue, "boom".into()] {
        let value = Try::<u16>::failure(cause).recover(|_| 42).get_or_else(0);
        assert_eq!(value, 42);
    }
}

#[test]
fn option_round_trip() {
    assert_eq!(Try::from_option(Some("x")).to_option(), Some("x"));
    assert!(Try::<&str>::from_option_or(None, || TryError::validation("absent")).is_failure());
}

#[test]
fn sequence_short_circuits() {
    let pulled = Cell::new(0);
    let items = vec![
        Try::success(1),
        Try::failure(TryError::validation("E")),
        Try::success(3),
    ];
    let result = sequence(items.into_iter().inspect(|_| pulled.set(pulled.get() + 1)));

    assert_eq!(result.cause(), Some(&TryError::validation("E")));
    assert_eq!(pulled.get(), 2);

    let ports = traverse(vec!["1", "2"], |raw| raw.len());
    assert_eq!(ports, Try::Success(vec![1, 1]));
}

#[test]
fn switch_exhaustiveness_failure_is_recoverable() {
    let outcome = Switch::on(2).case_value(1, |_| "one").evaluate();
    assert_eq!(
        outcome.cause().map(ToString::to_string).as_deref(),
        Some("No case matched and no default provided")
    );

    let recovered = Switch::on(2)
        .case_value(1, |_| "one")
        .evaluate()
        .recover(|_| "fallback")
        .get_or_else("unreachable");
    assert_eq!(recovered, "fallback");
}

#[test]
fn switch_on_parsed_input() {
    let classify = |raw: &str| {
        parse_port(raw).flat_map(|port| {
            Switch::on(port)
                .case_one_of(vec![80, 443], |_| "web")
                .case_when(|p: &u16| *p < 1024, |_| "system")
                .default(|_| "user")
                .evaluate()
        })
    };

    assert_eq!(classify("443"), Try::Success("web"));
    assert_eq!(classify("22"), Try::Success("system"));
    assert_eq!(classify("8080"), Try::Success("user"));
    assert!(classify("0").is_failure());
}

#[test]
fn retry_exhausts_then_fails() {
    init_tracing();
    let calls = Cell::new(0);
    let outcome: Try<()> = retry(&RetryConfig::fixed(3, Duration::ZERO), || {
        calls.set(calls.get() + 1);
        Err(ConfigError(format!("attempt {}", calls.get())))
    });

    assert_eq!(calls.get(), 3);
    assert_eq!(
        outcome.cause().and_then(|e| e.downcast_ref::<ConfigError>()),
        Some(&ConfigError("attempt 3".to_string()))
    );
}

#[test]
fn hooks_report_without_changing_state() {
    let logged = Cell::new(None);
    let outcome = parse_port("nope")
        .on_failure(|err| logged.set(Some(err.to_string())))
        .on_complete(|_| panic!("cleanup failed"));

    assert!(outcome.is_failure_of::<ConfigError>());
    assert_eq!(logged.take().as_deref(), Some("invalid config: bad port \"nope\""));
}

#[test]
fn retry_config_from_json() {
    let config: RetryConfig =
        serde_json::from_str(r#"{"max_attempts": 4, "delay_ms": 0}"#).unwrap();
    let calls = Cell::new(0);
    let outcome = retry(&config, || {
        calls.set(calls.get() + 1);
        if calls.get() == 4 {
            Ok(calls.get())
        } else {
            Err(ConfigError("flaky".to_string()))
        }
    });
    assert_eq!(outcome, Try::Success(4));
}

#[test]
fn anyhow_errors_are_captured() {
    let outcome: Try<u8> = Try::failure(TryError::from_anyhow(anyhow::anyhow!("remote said no")));
    assert_eq!(
        outcome.fold(|e| e.to_string(), |v| v.to_string()),
        "remote said no"
    );
}

#[tokio::test]
async fn async_handle_and_parallel() {
    let pre_failed = parse_port("bad").to_async_handle();
    assert!(pre_failed.await.is_failure_of::<ConfigError>());

    let spawned = AsyncHandle::spawn(|| "7".parse::<u8>());
    assert_eq!(spawned.await, Try::Success(7));

    let tasks: Vec<_> = (1..=3u8)
        .map(|n| move || n.to_string().parse::<u8>())
        .collect();
    let combined = tryflow::parallel_sequence(tasks).await;
    assert_eq!(combined, Try::Success(vec![1, 2, 3]));
}

#[tokio::test]
async fn async_retry_interrupted_by_cancel() {
    let cancel = CancelSignal::new();
    cancel.cancel();
    let backoff = TokioBackoff::cancellable(cancel);

    let outcome: Try<()> = tryflow::retry_async(
        &RetryConfig::fixed(5, Duration::from_secs(60)),
        &backoff,
        || async { Err(ConfigError("down".to_string())) },
    )
    .await;

    assert_eq!(outcome.cause(), Some(&TryError::Interrupted));
}

//! End-to-end behaviour of the debug operator against the process-wide store.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use futures_util::stream::{self, StreamExt};
use serial_test::serial;
use stream_debug::logger::MemoryLogger;
use stream_debug::{
    debug, reset_global_debug_config, set_global_debug_config, DebugOptions, DebugOverrides,
    DebugStreamExt, GlobalDebugConfigUpdate,
};

mod common;
use common::{args, install_memory_logger};

#[tokio::test]
#[serial]
async fn test_logs_value_without_label() {
    let logger = install_memory_logger();

    let values: Vec<&str> = stream::iter(vec!["x"])
        .debug(DebugOptions::Defaults)
        .collect()
        .await;

    assert_eq!(values, vec!["x"]);
    assert_eq!(logger.logged(), vec![args(&["\"x\""])]);
    reset_global_debug_config();
}

#[tokio::test]
#[serial]
async fn test_label_and_completion() {
    let logger = install_memory_logger();

    let values: Vec<&str> = stream::iter(vec!["x"]).debug("Label").collect().await;

    assert_eq!(values, vec!["x"]);
    assert_eq!(
        logger.logged(),
        vec![args(&["Label", "\"x\""]), args(&["Label completed"])]
    );
    reset_global_debug_config();
}

#[tokio::test]
#[serial]
async fn test_error_is_not_followed_by_completion() {
    let logger = install_memory_logger();

    let items: Vec<Result<i32, &str>> = stream::iter(vec![Ok(1), Err("boom")])
        .try_debug("L")
        .collect()
        .await;

    assert_eq!(items, vec![Ok(1), Err("boom")]);
    assert_eq!(logger.logged(), vec![args(&["L", "1"])]);
    assert_eq!(logger.errors(), vec![args(&["L", "\"boom\""])]);
    assert!(!logger
        .records()
        .iter()
        .any(|record| record.args == args(&["L completed"])));
    reset_global_debug_config();
}

#[tokio::test]
#[serial]
async fn test_async_stage_can_be_tapped() {
    let logger = install_memory_logger();

    let values: Vec<i32> = stream::iter(vec![1, 2])
        .then(|x| async move { x + 1 })
        .debug("L")
        .collect()
        .await;

    assert_eq!(values, vec![2, 3]);
    assert_eq!(
        logger.logged(),
        vec![args(&["L", "2"]), args(&["L", "3"]), args(&["L completed"])]
    );
    reset_global_debug_config();
}

#[tokio::test]
#[serial]
async fn test_global_prefix_becomes_label() {
    let logger = install_memory_logger();
    set_global_debug_config(GlobalDebugConfigUpdate::new().prefix("P"));

    let _: Vec<&str> = stream::iter(vec!["x"])
        .debug(DebugOptions::Defaults)
        .collect()
        .await;

    assert_eq!(
        logger.logged(),
        vec![args(&["P", "\"x\""]), args(&["P completed"])]
    );
    reset_global_debug_config();
}

#[tokio::test]
#[serial]
async fn test_prefix_and_label_are_joined() {
    let logger = install_memory_logger();
    set_global_debug_config(GlobalDebugConfigUpdate::new().prefix("P"));

    let _: Vec<i32> = stream::iter(vec![1]).debug("L").collect().await;

    assert_eq!(logger.logged()[0], args(&["P L", "1"]));
    reset_global_debug_config();
}

#[tokio::test]
#[serial]
async fn test_ignored_operator_logs_nothing() {
    let logger = install_memory_logger();

    let items: Vec<Result<&str, &str>> = stream::iter(vec![Ok("x"), Err("failure")])
        .try_debug(DebugOverrides::new().should_ignore(true))
        .collect()
        .await;

    assert_eq!(items, vec![Ok("x"), Err("failure")]);
    assert!(logger.is_empty());
    reset_global_debug_config();
}

#[tokio::test]
#[serial]
async fn test_global_ignore_flag() {
    let logger = install_memory_logger();
    set_global_debug_config(GlobalDebugConfigUpdate::new().should_ignore(true));

    let values: Vec<i32> = stream::iter(vec![1, 2]).debug("L").collect().await;

    assert_eq!(values, vec![1, 2]);
    assert!(logger.is_empty());
    reset_global_debug_config();
}

#[tokio::test]
#[serial]
async fn test_config_is_resolved_at_construction() {
    let logger = install_memory_logger();
    let operator = debug::<i32, Infallible>("early");

    set_global_debug_config(
        GlobalDebugConfigUpdate::new()
            .prefix("late")
            .should_ignore(true),
    );

    let _: Vec<i32> = stream::iter(vec![1]).debug_with(&operator).collect().await;

    assert_eq!(
        logger.logged(),
        vec![args(&["early", "1"]), args(&["early completed"])]
    );
    reset_global_debug_config();
}

#[tokio::test]
#[serial]
async fn test_from_logger_sees_logger_set_after_import() {
    install_memory_logger();
    let replacement = MemoryLogger::new();
    set_global_debug_config(GlobalDebugConfigUpdate::new().logger(replacement.clone()));

    let _: Vec<Result<i32, String>> = stream::iter(vec![Ok(1), Err("bad".to_string())])
        .try_debug(DebugOptions::from_logger(|logger| {
            let logger = logger.clone();
            DebugOverrides::new().error(move |e: &String| {
                logger.error(&[stream_debug::LogArg::Text("custom"), stream_debug::LogArg::Text(e)])
            })
        }))
        .collect()
        .await;

    assert_eq!(replacement.logged(), vec![args(&["1"])]);
    assert_eq!(replacement.errors(), vec![args(&["custom", "bad"])]);
    reset_global_debug_config();
}

#[tokio::test]
#[serial]
async fn test_handlers_observe_source_order() {
    install_memory_logger();
    let events = Arc::new(Mutex::new(Vec::new()));
    let (on_next, on_error, on_complete) = (events.clone(), events.clone(), events.clone());

    let _: Vec<Result<i32, i32>> = stream::iter(vec![Ok(1), Err(2), Ok(3)])
        .try_debug(
            DebugOverrides::new()
                .next(move |v: &i32| on_next.lock().unwrap().push(format!("next {}", v)))
                .error(move |e: &i32| on_error.lock().unwrap().push(format!("error {}", e)))
                .complete(move || on_complete.lock().unwrap().push("complete".to_string())),
        )
        .collect()
        .await;

    assert_eq!(
        *events.lock().unwrap(),
        vec!["next 1", "error 2", "next 3"]
    );
    reset_global_debug_config();
}

#[tokio::test]
#[serial]
async fn test_dropping_downstream_drops_source() {
    install_memory_logger();
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<i32>();
    let source = stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|v| (v, rx)) });

    let mut tapped = Box::pin(source.debug("chan"));
    tx.send(1).unwrap();
    assert_eq!(tapped.next().await, Some(1));

    drop(tapped);
    assert!(tx.send(2).is_err());
    reset_global_debug_config();
}

// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the generate-parse-record flow.
//!
//! Each test wires an in-memory store, a mock generation service and a
//! fresh cache, so the whole pipeline runs without a database or network.

use std::sync::Arc;

use copydeck_cache::CopyCache;
use copydeck_client::SequenceGuard;
use copydeck_core::traits::{GenerationService, KeyValueStore};
use copydeck_core::types::{CopyMeta, FormatSelection, GenerationRequest};
use copydeck_parser::parse_options;
use copydeck_test_utils::{MemoryKvStore, MockGeneration};

fn request(slot: FormatSelection) -> GenerationRequest {
    GenerationRequest {
        briefing_id: Some("b1".to_string()),
        slot,
        client: None,
        tone: None,
        extra_instructions: None,
        count: 3,
        pipeline: "standard".to_string(),
        task_type: "social_post".to_string(),
        force_provider: None,
    }
}

#[tokio::test]
async fn generated_output_is_parsed_and_recorded() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
    let cache = CopyCache::load(store).await.unwrap();
    let service = MockGeneration::with_outputs(vec![
        "1. Fresh drop, zero excuses.\n2. Your feed deserves better.".to_string(),
    ]);

    let slot = FormatSelection::new("Instagram", "Feed");
    let key = slot.key();
    let version = service.generate(&request(slot)).await.unwrap();

    let options = parse_options(&version.output);
    let meta = CopyMeta::from_version(&version);
    cache.record_generation(&key, None, &version.output, options.clone(), meta);

    assert_eq!(options.len(), 2);
    assert_eq!(cache.copy_for(&key, None), version.output);
    assert_eq!(cache.options_for(&key, None).len(), 2);
    let recorded = cache.meta_for(&key, None).unwrap();
    assert_eq!(recorded.model.as_deref(), Some("mock-model"));
}

#[tokio::test]
async fn superseded_generation_is_discarded() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
    let cache = CopyCache::load(store).await.unwrap();
    let service = MockGeneration::with_outputs(vec![
        "1. stale result".to_string(),
        "1. fresh result".to_string(),
    ]);
    let guard = SequenceGuard::new();

    let slot = FormatSelection::new("Instagram", "Stories");
    let key = slot.key();

    let first_ticket = guard.issue(&key);
    let first = service.generate(&request(slot.clone())).await.unwrap();
    let second_ticket = guard.issue(&key);
    let second = service.generate(&request(slot)).await.unwrap();

    // Latest wins regardless of completion order.
    if guard.is_current(&second_ticket) {
        cache.record_generation(
            &key,
            None,
            &second.output,
            parse_options(&second.output),
            CopyMeta::from_version(&second),
        );
    }
    assert!(!guard.is_current(&first_ticket));
    let _ = first;

    assert_eq!(cache.copy_for(&key, None), "1. fresh result");
}

#[tokio::test]
async fn client_scoped_recording_does_not_leak_across_clients() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
    let cache = CopyCache::load(store).await.unwrap();
    let service = MockGeneration::with_outputs(vec!["1. acme only".to_string()]);

    let slot = FormatSelection::new("Instagram", "Feed");
    let key = slot.key();
    let version = service.generate(&request(slot)).await.unwrap();
    cache.record_generation(
        &key,
        Some("acme"),
        &version.output,
        parse_options(&version.output),
        CopyMeta::from_version(&version),
    );

    assert!(cache.has_copy(&key, Some("acme")));
    assert!(!cache.has_copy(&key, Some("globex")));
    assert!(!cache.has_copy(&key, None));
    assert_eq!(service.requests().await.len(), 1);
}

//! Benchmarks for search and replace over large documents
//!
//! Run with: cargo bench search

use bulktext::host::NodeId;
use bulktext::memory::MemoryDocument;
use bulktext::messages::PanelMsg;
use bulktext::util::{literal_regex, substitute};
use bulktext::{update, SessionState};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// `frames` frames of 20 text nodes each, every fifth one mentioning "brown"
fn document(frames: usize) -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    let page = NodeId::new("0:1");
    for f in 0..frames {
        let frame = doc.add_frame(&page, &format!("{}:0", f + 1), "Frame");
        for t in 0..20 {
            let text = if t % 5 == 0 {
                "The quick brown fox jumps over the lazy dog."
            } else {
                "Lorem ipsum dolor sit amet, consectetur adipiscing elit."
            };
            doc.add_text(&frame, &format!("{}:{}", f + 1, t + 1), text);
        }
    }
    doc
}

// ============================================================================
// Pattern building
// ============================================================================

#[divan::bench(args = ["brown", "(USD) $5.00", "a.b*c+d?"])]
fn build_literal_regex(term: &str) {
    divan::black_box(literal_regex(divan::black_box(term), false).ok());
}

#[divan::bench(args = [1, 8, 64])]
fn substitute_all(repeats: usize) {
    let Ok(regex) = literal_regex("brown", false) else {
        return;
    };
    let text = "The quick Brown fox. ".repeat(repeats);
    divan::black_box(substitute(&regex, &text, "red", 0));
}

// ============================================================================
// Whole-document operations
// ============================================================================

#[divan::bench(args = [10, 100, 1_000])]
fn find_text(bencher: divan::Bencher, frames: usize) {
    let mut doc = document(frames);
    bencher.bench_local(|| {
        let mut model = SessionState::default();
        let msg = PanelMsg::FindText {
            query: "brown".to_string(),
            is_case_sensitive: false,
        };
        divan::black_box(pollster::block_on(update(&mut model, &mut doc, msg.into())));
    });
}

#[divan::bench(args = [10, 100, 1_000])]
fn replace_all(bencher: divan::Bencher, frames: usize) {
    bencher
        .with_inputs(|| (SessionState::default(), document(frames)))
        .bench_local_values(|(mut model, mut doc)| {
            let msg = PanelMsg::ReplaceAll {
                find_text: "brown".to_string(),
                replace_text: "red".to_string(),
                is_case_sensitive: false,
            };
            divan::black_box(pollster::block_on(update(&mut model, &mut doc, msg.into())));
        });
}

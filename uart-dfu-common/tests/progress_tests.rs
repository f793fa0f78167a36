// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for the status renderer and the bouncing block animator.

use pretty_assertions::assert_eq;

use uart_dfu_common::animator::{Animator, Direction, BLOCK_MAX_WIDTH};
use uart_dfu_common::progress::{complete_len, render, ProgressValue, TRACK_WIDTH};

fn track(line: &str) -> &str {
    let start = line.find('[').expect("opening bracket") + 1;
    let end = line.rfind(']').expect("closing bracket");
    &line[start..end]
}

fn count(text: &str, glyph: char) -> usize {
    text.chars().filter(|c| *c == glyph).count()
}

// =============================================================================
// Renderer tests
// =============================================================================

#[test]
fn test_percent_glyph_counts_for_every_value() {
    let animator = Animator::new();
    for p in 0..100u8 {
        let line = render(ProgressValue::Percent(p), &animator);
        let bar = track(&line.text);
        let filled = count(bar, '█');
        let blank = count(bar, ' ');

        assert_eq!(filled, TRACK_WIDTH * p as usize / 100, "percent {}", p);
        assert_eq!(filled + blank, TRACK_WIDTH, "percent {}", p);
        assert!(!line.terminal);
    }
}

#[test]
fn test_percent_line_layout() {
    let line = render(ProgressValue::Percent(50), &Animator::new());
    let expected = format!("\r[{}{}] 50%", "█".repeat(20), " ".repeat(20));
    assert_eq!(line.text, expected);
}

#[test]
fn test_percent_redraws_in_place() {
    let line = render(ProgressValue::Percent(7), &Animator::new());
    assert!(line.text.starts_with('\r'));
    assert!(!line.text.ends_with('\n'));
}

#[test]
fn test_complete_len_rounds_down() {
    assert_eq!(complete_len(0), 0);
    assert_eq!(complete_len(2), 0);
    assert_eq!(complete_len(3), 1);
    assert_eq!(complete_len(99), 39);
}

#[test]
fn test_done_line() {
    let line = render(ProgressValue::Done, &Animator::new());
    assert_eq!(line.text, format!("\r[{}] done.\n", "█".repeat(TRACK_WIDTH)));
    assert!(line.terminal);
}

#[test]
fn test_failed_line() {
    let line = render(ProgressValue::Failed, &Animator::new());
    assert_eq!(line.text, format!("\r[{}] failed.\n", "-".repeat(TRACK_WIDTH)));
    assert!(line.terminal);
}

#[test]
fn test_indeterminate_line_follows_animator() {
    let mut animator = Animator::new();
    for _ in 0..25 {
        animator.step();
    }
    // 20 frames of growth, then 5 slides
    assert_eq!(animator.position(), 5);
    assert_eq!(animator.block_width(), 20);

    let line = render(ProgressValue::Indeterminate, &animator);
    let expected = format!("\r[{}{}{}] ...", " ".repeat(5), "█".repeat(20), " ".repeat(15));
    assert_eq!(line.text, expected);
    assert!(!line.terminal);
}

#[test]
fn test_indeterminate_track_is_always_full_width() {
    let mut animator = Animator::new();
    for _ in 0..200 {
        animator.step();
        let line = render(ProgressValue::Indeterminate, &animator);
        assert_eq!(track(&line.text).chars().count(), TRACK_WIDTH);
    }
}

// =============================================================================
// Animator tests
// =============================================================================

#[test]
fn test_animator_starts_collapsed() {
    let animator = Animator::new();
    assert_eq!(animator.position(), 0);
    assert_eq!(animator.block_width(), 0);
    assert_eq!(animator.direction(), Direction::Forward);
}

#[test]
fn test_animator_grows_at_left_edge_first() {
    let mut animator = Animator::new();
    for expected in 1..=BLOCK_MAX_WIDTH {
        animator.step();
        assert_eq!(animator.position(), 0);
        assert_eq!(animator.block_width(), expected);
    }
    animator.step();
    assert_eq!(animator.position(), 1);
    assert_eq!(animator.block_width(), BLOCK_MAX_WIDTH);
}

#[test]
fn test_animator_shrinks_into_right_edge_then_reverses() {
    let mut animator = Animator::new();
    // 20 grow + 20 slide + 20 shrink
    for _ in 0..60 {
        animator.step();
    }
    assert_eq!(animator.position(), TRACK_WIDTH);
    assert_eq!(animator.block_width(), 0);
    assert_eq!(animator.direction(), Direction::Forward);

    animator.step();
    assert_eq!(animator.direction(), Direction::Reverse);
}

#[test]
fn test_animator_invariants_hold() {
    let mut animator = Animator::new();
    for _ in 0..1000 {
        animator.step();
        assert!(animator.block_width() <= BLOCK_MAX_WIDTH);
        assert!(animator.position() + animator.block_width() <= TRACK_WIDTH);
    }
}

#[test]
fn test_animator_full_cycle_returns_to_start() {
    let mut animator = Animator::new();
    let mut steps = 0;
    let mut reversed = false;

    loop {
        animator.step();
        steps += 1;
        reversed |= animator.direction() == Direction::Reverse;
        if reversed && animator == Animator::new() {
            break;
        }
        assert!(steps < 1000, "animation never returned to start");
    }

    // 61 frames out (including the flip), 61 frames back
    assert_eq!(steps, 122);
}

//! Alignment chain scenarios
//!
//! End-to-end checks of `align` + `synthesize` on realistic file and
//! chapter naming, including shuffled inputs.

mod helpers;

use abmd_ai::services::{align, natural_sort, synthesize, ChapterAligner};
use abmd_ai::types::{Alignment, LocalTrack, StrategyKind, SynthesisWarning, TrackIdentity};
use abmd_ai::AlignmentConfig;
use helpers::*;
use tracing::Level;

const SEEDS: [u64; 5] = [1, 7, 42, 1234, 98765];

#[test]
fn numeric_titles_sort_regardless_of_shuffle() {
    let titles: Vec<String> = (1..=13).map(|n| format!("{:02}", n)).collect();
    // Catalog has one chapter more than there are files
    let chapters: Vec<String> = (1..=14).map(|n| format!("Chapter {:02}", n)).collect();
    let remote = album(&as_strs(&chapters));

    for seed in SEEDS {
        let tracks = shuffled(&locals(&as_strs(&titles)), seed);
        let alignment = align(&tracks, &remote).unwrap().unwrap();

        assert_eq!(alignment.strategy(), StrategyKind::NaturalSort);
        assert_eq!(ordered_titles(&alignment), titles, "seed {}", seed);
    }
}

#[test]
fn numeric_titles_with_matching_count_pass_through() {
    let titles: Vec<String> = (1..=13).map(|n| format!("{:02}", n)).collect();
    let remote = album(&as_strs(&titles));

    let tracks = shuffled(&locals(&as_strs(&titles)), 3);
    let alignment = align(&tracks, &remote).unwrap().unwrap();
    assert!(alignment.is_remote_order());

    let synthesis = synthesize(&alignment, &remote).unwrap();
    let out: Vec<&str> = synthesis.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(out, as_strs(&titles));
}

#[test]
fn chapter_titles_with_matching_count_pass_through() {
    let titles = numbered("Chapter ", 1..=10);
    let remote = album(&as_strs(&titles));

    for seed in SEEDS {
        let tracks = shuffled(&locals(&as_strs(&titles)), seed);
        let alignment = align(&tracks, &remote).unwrap().unwrap();
        let expected: Vec<TrackIdentity> = locals(&as_strs(&titles))
            .into_iter()
            .map(|t| t.identity)
            .collect();
        assert_eq!(
            alignment,
            Alignment::RemoteOrder {
                strategy: StrategyKind::NaturalSort,
                locals: expected
            }
        );
    }
}

#[test]
fn pass_through_maps_each_chapter_to_its_file() {
    let remote = album(&["Chapter 1", "Chapter 2", "Chapter 3"]);
    let tracks = vec![
        LocalTrack::new("Chapter 3", "three.mp3"),
        LocalTrack::new("Chapter 1", "one.mp3"),
        LocalTrack::new("Chapter 2", "two.mp3"),
    ];

    let alignment = align(&tracks, &remote).unwrap().unwrap();
    assert!(alignment.is_remote_order());

    let synthesis = synthesize(&alignment, &remote).unwrap();
    let out: Vec<(u32, &str, &str)> = synthesis
        .tracks
        .iter()
        .map(|t| (t.position, t.title.as_str(), t.identity.as_str()))
        .collect();
    assert_eq!(
        out,
        vec![
            (1, "Chapter 1", "one.mp3"),
            (2, "Chapter 2", "two.mp3"),
            (3, "Chapter 3", "three.mp3"),
        ]
    );
}

#[test]
fn single_file_single_chapter_takes_remote_title() {
    let tracks = locals(&["audiobook.m4b"]);
    let remote = album(&["The Complete Book"]);

    let alignment = align(&tracks, &remote).unwrap().unwrap();
    assert_eq!(alignment.strategy(), StrategyKind::SingleItem);

    let synthesis = synthesize(&alignment, &remote).unwrap();
    assert_eq!(synthesis.tracks.len(), 1);
    assert_eq!(synthesis.tracks[0].title, "The Complete Book");
    assert_eq!(synthesis.tracks[0].identity, tracks[0].identity);
}

#[test]
fn single_file_many_chapters_keeps_local_title() {
    let tracks = locals(&["audiobook.m4b"]);
    let remote = album(&["One", "Two", "Three"]);

    let alignment = align(&tracks, &remote).unwrap().unwrap();
    assert_eq!(alignment.strategy(), StrategyKind::SingleItem);
    let synthesis = synthesize(&alignment, &remote).unwrap();
    assert_eq!(synthesis.tracks[0].title, "audiobook.m4b");
    assert_eq!(synthesis.tracks[0].total, 1);
}

#[test]
fn leading_numbers_inside_book_boilerplate() {
    let names = [
        "Ash", "Mists", "Luthadel", "Vin", "Kelsier", "Allomancy", "Keep", "Ball", "Skaa", "Pits",
        "Lord", "Well",
    ];
    let titles: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("Mistborn - {:02} - {}", i + 1, name))
        .collect();
    let remote = album(&["Prologue", "Part One", "Part Two", "Epilogue"]);

    for seed in SEEDS {
        let tracks = shuffled(&locals(&as_strs(&titles)), seed);
        let alignment = align(&tracks, &remote).unwrap().unwrap();
        assert_eq!(alignment.strategy(), StrategyKind::LeadingNumber);
        assert_eq!(ordered_titles(&alignment), titles);
    }
}

#[test]
fn leading_numbers_sharing_a_digit_prefix() {
    // "10".."19" share the prefix "1", leaving 0..9 as the numbers
    let titles: Vec<String> = ('a'..='j')
        .enumerate()
        .map(|(i, c)| format!("{} - {}", 10 + i, c))
        .collect();
    let remote = album(&["Opening", "Closing"]);

    for seed in SEEDS {
        let tracks = shuffled(&locals(&as_strs(&titles)), seed);
        let alignment = align(&tracks, &remote).unwrap().unwrap();
        assert_eq!(alignment.strategy(), StrategyKind::LeadingNumber);
        assert_eq!(ordered_titles(&alignment), titles, "seed {}", seed);

        let Alignment::Ordered(ordered) = &alignment else {
            panic!("expected local ordering");
        };
        let out: Vec<LocalTrack> = ordered.tracks.iter().map(|t| t.local.clone()).collect();
        assert_eq!(sorted_identities(&out), sorted_identities(&tracks));
    }
}

#[test]
fn trusted_numbering_wins_unless_disabled() {
    // Embedded numbers contradict the leading numbers in the titles
    let tracks = vec![
        abmd_ai::LocalTrack::new("1 - Start", "a.mp3").with_ordinal(2),
        abmd_ai::LocalTrack::new("2 - End", "b.mp3").with_ordinal(1),
    ];
    let remote = album(&["Start", "End"]);

    let alignment = align(&tracks, &remote).unwrap().unwrap();
    assert_eq!(alignment.strategy(), StrategyKind::TrustedNumbering);
    assert_eq!(ordered_titles(&alignment), vec!["2 - End", "1 - Start"]);

    let untrusting = ChapterAligner::new(AlignmentConfig {
        trust_local_numbering: false,
        ..AlignmentConfig::default()
    });
    let alignment = untrusting.align(&tracks, &remote).unwrap().unwrap();
    assert_eq!(alignment.strategy(), StrategyKind::LeadingNumber);
    assert_eq!(ordered_titles(&alignment), vec!["1 - Start", "2 - End"]);
}

#[test]
fn greedy_assignment_follows_remote_titles() {
    let remote_titles = ["Prologue", "Landfall", "The Storm", "Aftermath"];
    let remote = album(&remote_titles);
    let tracks = locals(&["The Storm", "Aftermath", "Prologue", "Landfall"]);

    let alignment = align(&tracks, &remote).unwrap().unwrap();
    assert_eq!(alignment.strategy(), StrategyKind::GreedyNearest);
    assert_eq!(ordered_titles(&alignment), remote_titles);

    let synthesis = synthesize(&alignment, &remote).unwrap();
    let sources: Vec<Option<u32>> = synthesis.tracks.iter().map(|t| t.source_chapter).collect();
    assert_eq!(sources, vec![Some(1), Some(2), Some(3), Some(4)]);
}

#[test]
fn greedy_with_more_files_than_chapters() {
    let remote = album(&["Prologue", "Epilogue"]);
    let tracks = locals(&["Epilogue", "Prologue", "Bonus Interview"]);

    let alignment = align(&tracks, &remote).unwrap().unwrap();
    assert_eq!(alignment.strategy(), StrategyKind::GreedyNearest);
    assert_eq!(ordered_titles(&alignment), ["Prologue", "Epilogue", "Bonus Interview"]);

    let synthesis = synthesize(&alignment, &remote).unwrap();
    assert_eq!(synthesis.tracks[2].source_chapter, None);
    assert_eq!(synthesis.tracks[2].total, 3);
}

#[test]
fn strategy_results_are_permutations_of_input() {
    let fixtures: Vec<(Vec<String>, Vec<String>)> = vec![
        (numbered("Track ", 1..=9), numbered("Chapter ", 1..=12)),
        (numbered("Part", 1..=20), numbered("Part ", 1..=20)),
        (
            vec!["Intro".into(), "Body".into(), "Outro".into(), "Credits".into()],
            vec!["Opening".into(), "Main".into()],
        ),
        (
            (1..=8).map(|n| format!("{} - Section", n)).collect(),
            numbered("Chapter ", 1..=8),
        ),
    ];

    for (local_titles, remote_titles) in &fixtures {
        let remote = album(&as_strs(remote_titles));
        for seed in SEEDS {
            let tracks = shuffled(&locals(&as_strs(local_titles)), seed);
            let Some(alignment) = align(&tracks, &remote).unwrap() else {
                continue;
            };
            if let Alignment::Ordered(ordered) = &alignment {
                let out: Vec<_> = ordered.tracks.iter().map(|t| t.local.clone()).collect();
                assert_eq!(sorted_identities(&out), sorted_identities(&tracks));
            }

            let synthesis = synthesize(&alignment, &remote).unwrap();
            let mut identities: Vec<String> =
                synthesis.tracks.iter().map(|t| t.identity.to_string()).collect();
            identities.sort();
            assert_eq!(identities, sorted_identities(&tracks));
            let positions: Vec<u32> = synthesis.tracks.iter().map(|t| t.position).collect();
            let expected: Vec<u32> = (1..=synthesis.tracks.len() as u32).collect();
            assert_eq!(positions, expected);
        }
    }
}

#[test]
fn natural_sort_is_order_independent_and_idempotent() {
    let titles = [
        "Book 1 - Chapter 10",
        "Book 1 - Chapter 2",
        "Book 1 - Chapter 1",
        "Book 2 - Chapter 1",
        "book 1 - chapter 3",
        "Book 10 - Chapter 1",
        "Appendix",
    ];
    let tracks = locals(&titles);
    let expected = natural_sort(&tracks);

    for seed in SEEDS {
        assert_eq!(natural_sort(&shuffled(&tracks, seed)), expected);
    }
    let mut reversed = tracks.clone();
    reversed.reverse();
    assert_eq!(natural_sort(&reversed), expected);
    assert_eq!(natural_sort(&expected), expected);

    let out: Vec<&str> = expected.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(
        out,
        vec![
            "Appendix",
            "Book 1 - Chapter 1",
            "Book 1 - Chapter 2",
            "book 1 - chapter 3",
            "Book 1 - Chapter 10",
            "Book 2 - Chapter 1",
            "Book 10 - Chapter 1",
        ]
    );
}

#[test]
fn inaccurate_chapter_data_is_surfaced_on_pass_through() {
    let titles = numbered("Chapter ", 1..=4);
    let mut remote = album(&as_strs(&titles));
    remote.is_chapter_data_accurate = false;
    let tracks = shuffled(&locals(&as_strs(&titles)), 11);

    let (synthesis, logs) = LogCapture::capture(|| {
        let alignment = align(&tracks, &remote).unwrap().unwrap();
        synthesize(&alignment, &remote).unwrap()
    });

    assert_eq!(synthesis.warnings, vec![SynthesisWarning::ApproximateChapterData]);
    assert!(logs.contains_at(Level::WARN, "Chapter data could be inaccurate"));
    logs.assert_contains("Alignment strategy matched");
}

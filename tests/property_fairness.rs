use equidad::fairness::DifferentialFairness;
use equidad::frame::{Frame, Value};
use equidad::groups::{CountOrder, GroupLabeler};
use proptest::collection::vec;
use proptest::prelude::*;

/// Binary prediction paired with a group index drawn from a small alphabet.
fn samples() -> impl Strategy<Value = Vec<(f64, u8)>> {
    vec((prop_oneof![Just(0.0), Just(1.0)], 0u8..6), 1..200)
}

fn group_names(samples: &[(f64, u8)], names: &[&str]) -> Vec<String> {
    samples.iter().map(|(_, g)| names[*g as usize % names.len()].to_string()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // =============================================================================
    // Epsilon properties
    // =============================================================================

    #[test]
    fn prop_epsilon_finite_and_non_negative(samples in samples()) {
        let predictions: Vec<f64> = samples.iter().map(|(p, _)| *p).collect();
        let groups = group_names(&samples, &["a", "b", "c", "d", "e", "f"]);

        let epsilon = DifferentialFairness::default()
            .epsilon(&predictions, &groups)
            .unwrap();
        prop_assert!(epsilon.is_finite(), "epsilon not finite: {epsilon}");
        prop_assert!(epsilon >= 0.0, "epsilon negative: {epsilon}");
    }

    #[test]
    fn prop_epsilon_invariant_under_relabeling(samples in samples()) {
        let predictions: Vec<f64> = samples.iter().map(|(p, _)| *p).collect();
        let original = group_names(&samples, &["a", "b", "c", "d", "e", "f"]);
        let renamed = group_names(&samples, &["u", "v", "w", "x", "y", "z"]);

        let df = DifferentialFairness::default();
        let a = df.epsilon(&predictions, &original).unwrap();
        let b = df.epsilon(&predictions, &renamed).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_epsilon_zero_for_single_group(
        predictions in vec(prop_oneof![Just(0.0), Just(1.0)], 1..100)
    ) {
        let groups = vec!["only".to_string(); predictions.len()];
        let epsilon = DifferentialFairness::default()
            .epsilon(&predictions, &groups)
            .unwrap();
        prop_assert_eq!(epsilon, 0.0);
    }

    #[test]
    fn prop_epsilon_matches_pairwise_maximum(samples in samples(), prior in 1e-9f64..1.0) {
        // The min/max shortcut must agree with the full pairwise scan
        let predictions: Vec<f64> = samples.iter().map(|(p, _)| *p).collect();
        let groups = group_names(&samples, &["a", "b", "c", "d", "e", "f"]);

        let df = DifferentialFairness::new(prior);
        let epsilon = df.epsilon(&predictions, &groups).unwrap();

        let mut tally: std::collections::HashMap<&str, (usize, usize)> =
            std::collections::HashMap::new();
        for (p, g) in predictions.iter().zip(&groups) {
            let entry = tally.entry(g.as_str()).or_insert((0, 0));
            entry.0 += 1;
            if *p == 1.0 {
                entry.1 += 1;
            }
        }
        let logs: Vec<f64> = tally
            .values()
            .map(|&(n, k)| df.smoothed_rate(n, k).ln())
            .collect();
        let mut pairwise: f64 = 0.0;
        for i in &logs {
            for j in &logs {
                pairwise = pairwise.max((i - j).abs());
            }
        }

        if logs.len() <= 1 {
            prop_assert_eq!(epsilon, 0.0);
        } else {
            prop_assert_eq!(epsilon, pairwise);
        }
    }

    #[test]
    fn prop_smoothed_rate_strictly_bounded(
        n in 1usize..10_000,
        k_frac in 0.0f64..=1.0,
        prior in 1e-9f64..1.0
    ) {
        let k = ((n as f64) * k_frac).round() as usize;
        let p = DifferentialFairness::new(prior).smoothed_rate(n, k.min(n));
        prop_assert!(p > 0.0 && p < 1.0, "p={p} for n={n}, k={k}, prior={prior}");
    }

    // =============================================================================
    // Labeling properties
    // =============================================================================

    #[test]
    fn prop_counts_sum_to_rows(values in vec((0u8..4, 0u8..3), 0..150)) {
        let frame = Frame::from_columns(vec![
            (
                "a".to_string(),
                values.iter().map(|(a, _)| Value::Int(*a as i64)).collect(),
            ),
            (
                "b".to_string(),
                values.iter().map(|(_, b)| Value::Int(*b as i64)).collect(),
            ),
        ])
        .unwrap();

        let labeler = GroupLabeler::new(["a", "b"]).unwrap();
        let grouping = labeler.label(&frame).unwrap();

        let total: usize = grouping.counts.iter().map(|c| c.count).sum();
        prop_assert_eq!(total, values.len());
        prop_assert_eq!(grouping.labels.len(), values.len());
        prop_assert_eq!(grouping.group_map.len(), grouping.counts.len());
    }

    #[test]
    fn prop_labels_permute_with_rows(
        values in vec((0u8..4, 0u8..3), 1..60),
        seed in any::<u64>()
    ) {
        // labels[i] depends only on row i: permuting rows permutes labels identically
        let build = |rows: &[(u8, u8)]| {
            let frame = Frame::from_columns(vec![
                (
                    "a".to_string(),
                    rows.iter().map(|(a, _)| Value::Int(*a as i64)).collect(),
                ),
                (
                    "b".to_string(),
                    rows.iter().map(|(_, b)| Value::Int(*b as i64)).collect(),
                ),
            ])
            .unwrap();
            GroupLabeler::new(["a", "b"]).unwrap().label(&frame).unwrap().labels
        };

        let labels = build(&values);

        // Deterministic Fisher-Yates driven by a simple LCG
        let mut permuted = values.clone();
        let mut indices: Vec<usize> = (0..values.len()).collect();
        let mut state = seed | 1;
        for i in (1..permuted.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state >> 33) as usize % (i + 1);
            permuted.swap(i, j);
            indices.swap(i, j);
        }

        let permuted_labels = build(&permuted);
        for (pos, &original_pos) in indices.iter().enumerate() {
            prop_assert_eq!(&permuted_labels[pos], &labels[original_pos]);
        }
    }

    #[test]
    fn prop_label_equality_iff_value_equality(
        rows in vec((0u8..4, 0u8..3), 2..60)
    ) {
        let frame = Frame::from_columns(vec![
            (
                "a".to_string(),
                rows.iter().map(|(a, _)| Value::Int(*a as i64)).collect(),
            ),
            (
                "b".to_string(),
                rows.iter().map(|(_, b)| Value::Int(*b as i64)).collect(),
            ),
        ])
        .unwrap();

        let labels = GroupLabeler::new(["a", "b"])
            .unwrap()
            .label(&frame)
            .unwrap()
            .labels;

        for i in 0..rows.len() {
            for j in 0..rows.len() {
                prop_assert_eq!(labels[i] == labels[j], rows[i] == rows[j]);
            }
        }
    }

    #[test]
    fn prop_count_order_is_presentation_only(values in vec((0u8..4, 0u8..3), 0..150)) {
        let frame = Frame::from_columns(vec![
            (
                "a".to_string(),
                values.iter().map(|(a, _)| Value::Int(*a as i64)).collect(),
            ),
            (
                "b".to_string(),
                values.iter().map(|(_, b)| Value::Int(*b as i64)).collect(),
            ),
        ])
        .unwrap();

        let descending = GroupLabeler::new(["a", "b"])
            .unwrap()
            .with_count_order(CountOrder::Descending)
            .label(&frame)
            .unwrap();
        let first_seen = GroupLabeler::new(["a", "b"])
            .unwrap()
            .with_count_order(CountOrder::FirstSeen)
            .label(&frame)
            .unwrap();

        prop_assert_eq!(&descending.labels, &first_seen.labels);

        let mut a = descending.counts.clone();
        let mut b = first_seen.counts.clone();
        a.sort_by(|x, y| x.label.cmp(&y.label));
        b.sort_by(|x, y| x.label.cmp(&y.label));
        prop_assert_eq!(a, b);
    }
}

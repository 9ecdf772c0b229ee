//! Property-based tests for the audit engine using proptest
//!
//! Checks the engine-level guarantees over generated inputs: every string
//! classifies, auditing is deterministic, non-fixable inputs pass through
//! untouched, and fixable shapes normalize to the canonical form without
//! inventing or dropping digits.

use phone_audit::prelude::*;
use proptest::prelude::*;

const NDC2: &[&str] = &["43", "44", "51", "58", "74", "75", "76", "77", "78", "79"];
const NDC3: &[&str] = &["800", "840", "842", "844", "848", "900", "901", "906"];

// Strategy for a valid 9-digit significant-digit string (NDC + SBN)
fn significant_digits_strategy() -> impl Strategy<Value = String> {
    let two = (prop::sample::select(NDC2), "[0-9]{7}")
        .prop_map(|(ndc, sbn)| format!("{}{}", ndc, sbn));
    let three = (prop::sample::select(NDC3), "[0-9]{6}")
        .prop_map(|(ndc, sbn)| format!("{}{}", ndc, sbn));
    prop_oneof![two, three]
}

// Strategy wrapping valid digits in one of the recognized malformed shapes
fn fixable_input_strategy() -> impl Strategy<Value = String> {
    (significant_digits_strategy(), 0usize..8).prop_map(|(digits, shape)| match shape {
        0 => format!("+041(0)00{}", digits),
        1 => format!("+41(0)0{}", digits),
        2 => format!("+410{}", digits),
        3 => format!("+41(0){}", digits),
        4 => format!("41{}", digits),
        5 => format!("0041{}", digits),
        6 => format!("0{}", digits),
        _ => format!("+{}", digits),
    })
}

// Intersperse formatting noise (spaces/dashes) that stripping must undo
fn noisy(input: String, seps: Vec<u8>) -> String {
    let mut out = String::new();
    for (i, c) in input.chars().enumerate() {
        out.push(c);
        match seps.get(i % seps.len().max(1)) {
            Some(1) => out.push(' '),
            Some(2) => out.push('-'),
            _ => {}
        }
    }
    out
}

fn expected_canonical(digits: &str) -> String {
    let (ndc, sbn) = if NDC2.contains(&&digits[0..2]) {
        digits.split_at(2)
    } else {
        digits.split_at(3)
    };
    if ndc.len() == 2 {
        format!("+41 (0){} {} {} {}", ndc, &sbn[0..3], &sbn[3..5], &sbn[5..7])
    } else {
        format!("+41 (0){} {} {}", ndc, &sbn[0..3], &sbn[3..6])
    }
}

proptest! {
    // Classification exhaustiveness: every possible input resolves to
    // exactly one disposition; audit never errors on the standard registry.
    #[test]
    fn prop_every_input_classifies(input in ".*") {
        let auditor = Auditor::swiss();
        let result = auditor.audit(&input);
        prop_assert!(result.is_ok(), "input {:?} -> {:?}", input, result);
    }

    // Determinism: two audits of the same input are byte-identical.
    #[test]
    fn prop_audit_is_deterministic(input in ".*") {
        let auditor = Auditor::swiss();
        let first = auditor.audit(&input).unwrap();
        let second = auditor.audit(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    // Non-fixable dispositions never touch the input.
    #[test]
    fn prop_non_fixable_output_unchanged(input in ".*") {
        let auditor = Auditor::swiss();
        let result = auditor.audit(&input).unwrap();
        if result.disposition != Disposition::Fixable {
            prop_assert_eq!(result.normalized_output, input);
        }
    }

    // Every recognized malformed shape of a valid number normalizes to the
    // canonical rendering, regardless of interspersed spaces and dashes.
    #[test]
    fn prop_fixable_shapes_normalize(
        (digits, input) in (significant_digits_strategy(), 0usize..8, prop::collection::vec(0u8..3, 1..6))
            .prop_map(|(digits, shape, seps)| {
                let compact = match shape {
                    0 => format!("+041(0)00{}", digits),
                    1 => format!("+41(0)0{}", digits),
                    2 => format!("+410{}", digits),
                    3 => format!("+41(0){}", digits),
                    4 => format!("41{}", digits),
                    5 => format!("0041{}", digits),
                    6 => format!("0{}", digits),
                    _ => format!("+{}", digits),
                };
                (digits, noisy(compact, seps))
            })
    ) {
        let auditor = Auditor::swiss();
        let result = auditor.audit(&input).unwrap();
        prop_assert_eq!(result.disposition, Disposition::Fixable, "input {:?}", &input);
        prop_assert_eq!(&result.normalized_output, &expected_canonical(&digits));
    }

    // Digit preservation: beyond the constant country code, the canonical
    // output carries exactly the significant digits of the input.
    #[test]
    fn prop_fixable_digits_preserved(input in fixable_input_strategy()) {
        let auditor = Auditor::swiss();
        let result = auditor.audit(&input).unwrap();
        prop_assert_eq!(result.disposition, Disposition::Fixable);

        let output_digits: String = result
            .normalized_output
            .strip_prefix("+41 (0)")
            .expect("canonical shape")
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let input_digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        prop_assert!(
            input_digits.ends_with(&output_digits),
            "input digits {:?} vs output digits {:?}",
            input_digits,
            output_digits
        );
        prop_assert_eq!(output_digits.len(), 9);
    }

    // Idempotence: re-auditing a canonical rendering reproduces it.
    #[test]
    fn prop_canonical_is_idempotent(input in fixable_input_strategy()) {
        let auditor = Auditor::swiss();
        let first = auditor.audit(&input).unwrap();
        let second = auditor.audit(&first.normalized_output).unwrap();
        prop_assert_eq!(second.disposition, Disposition::Fixable);
        prop_assert_eq!(second.normalized_output, first.normalized_output);
    }
}

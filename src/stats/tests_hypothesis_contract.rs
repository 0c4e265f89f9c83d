// =========================================================================
// FALSIFY-FT: F-test contract
//
// Each test names the property it tries to falsify. A failure message
// starting with FALSIFIED means the evaluator broke a textbook property of
// the variance-ratio test, not just a golden value.
//
// References:
//   - Snedecor & Cochran (1989) "Statistical Methods", 8th ed., §6.12
//   - Casella & Berger (2002) "Statistical Inference", §8.3
// =========================================================================

use super::*;

const X1: [f64; 6] = [1.2, 3.4, 2.2, 5.9, 4.1, 0.7];
const X2: [f64; 8] = [2.0, 2.1, 1.9, 2.4, 2.2, 1.7, 2.05, 2.3];

/// FALSIFY-FT-001: degrees of freedom are sample sizes minus one
#[test]
fn falsify_ft_001_degrees_of_freedom() {
    for alt in [Alternative::TwoSided, Alternative::Greater, Alternative::Less] {
        let result = f_test(&X1, &X2, alt, 0.05, 6).expect("valid input");
        assert_eq!(result.df1, X1.len() - 1, "FALSIFIED FT-001: df1 for {alt}");
        assert_eq!(result.df2, X2.len() - 1, "FALSIFIED FT-001: df2 for {alt}");
    }
}

/// FALSIFY-FT-002: two-sided p-value is in [0, 1]
#[test]
fn falsify_ft_002_two_sided_pvalue_bounded() {
    for (a, b) in [(&X1[..], &X2[..]), (&X2[..], &X1[..]), (&X1[..], &X1[..])] {
        let result = f_test(a, b, Alternative::TwoSided, 0.05, 6).expect("valid input");
        assert!(
            (0.0..=1.0).contains(&result.pvalue),
            "FALSIFIED FT-002: p-value={} outside [0,1]",
            result.pvalue
        );
    }
}

/// FALSIFY-FT-003: "greater" p-value equals 1 - CDF(F)
#[test]
fn falsify_ft_003_greater_is_upper_tail() {
    let result = f_test(&X1, &X2, Alternative::Greater, 0.05, 6).expect("valid input");
    let dist = FDistribution::new(result.df1, result.df2).expect("valid freedom");
    let expected = round_to(1.0 - dist.cdf(result.statistic), 6);
    assert_eq!(
        result.pvalue, expected,
        "FALSIFIED FT-003: p-value={} but 1 - CDF(F)={}",
        result.pvalue, expected
    );
}

/// FALSIFY-FT-004: one-sided p-values are complementary
#[test]
fn falsify_ft_004_one_sided_complement() {
    let greater = f_test(&X1, &X2, Alternative::Greater, 0.05, 12).expect("valid input");
    let less = f_test(&X1, &X2, Alternative::Less, 0.05, 12).expect("valid input");
    assert!(
        (greater.pvalue + less.pvalue - 1.0).abs() < 1e-10,
        "FALSIFIED FT-004: greater={} less={} do not sum to 1",
        greater.pvalue,
        less.pvalue
    );
}

/// FALSIFY-FT-005: two-sided p-value is twice the smaller one-sided p-value
#[test]
fn falsify_ft_005_two_sided_doubling() {
    let two = f_test(&X1, &X2, Alternative::TwoSided, 0.05, 12).expect("valid input");
    let greater = f_test(&X1, &X2, Alternative::Greater, 0.05, 12).expect("valid input");
    let less = f_test(&X1, &X2, Alternative::Less, 0.05, 12).expect("valid input");
    let expected = 2.0 * greater.pvalue.min(less.pvalue);
    assert!(
        (two.pvalue - expected).abs() < 1e-10,
        "FALSIFIED FT-005: two-sided={} expected={}",
        two.pvalue,
        expected
    );
}

/// FALSIFY-FT-006: swapping samples inverts the statistic and keeps the
/// two-sided p-value when sample sizes match
#[test]
fn falsify_ft_006_swap_symmetry() {
    let a = [1.0, 2.5, 3.0, 4.5, 7.0];
    let b = [2.0, 2.2, 2.9, 3.1, 3.3];
    let ab = f_test(&a, &b, Alternative::TwoSided, 0.05, 9).expect("valid input");
    let ba = f_test(&b, &a, Alternative::TwoSided, 0.05, 9).expect("valid input");
    assert!(
        (ab.statistic * ba.statistic - 1.0).abs() < 1e-6,
        "FALSIFIED FT-006: F(a,b)={} F(b,a)={}",
        ab.statistic,
        ba.statistic
    );
    assert!(
        (ab.pvalue - ba.pvalue).abs() < 1e-6,
        "FALSIFIED FT-006: p(a,b)={} p(b,a)={}",
        ab.pvalue,
        ba.pvalue
    );
}

/// FALSIFY-FT-007: clearly different spreads are detected
#[test]
fn falsify_ft_007_detects_variance_difference() {
    let wide = [-10.0, -6.0, -2.0, 0.0, 3.0, 7.0, 11.0, 14.0];
    let narrow = [0.9, 1.1, 1.0, 0.95, 1.05, 1.02, 0.98, 1.0];
    let result = f_test(&wide, &narrow, Alternative::TwoSided, 0.05, 6).expect("valid input");
    assert!(
        result.pvalue < 0.05,
        "FALSIFIED FT-007: p-value={} >= 0.05 for clearly different spreads",
        result.pvalue
    );
    assert_eq!(result.in_rejection_region(), Some(true));
}

/// FALSIFY-FT-008: critical values bracket 1 and order correctly
#[test]
fn falsify_ft_008_critical_value_ordering() {
    let result = f_test(&X1, &X2, Alternative::TwoSided, 0.05, 6).expect("valid input");
    let (low, up) = result.confidence_interval().expect("two-sided has both bounds");
    assert!(
        low < 1.0 && 1.0 < up,
        "FALSIFIED FT-008: interval ({low}; {up}) does not contain 1"
    );
}

/// FALSIFY-FT-009: an unknown alternative is an error, never a result
#[test]
fn falsify_ft_009_unknown_alternative() {
    let parsed = "bogus".parse::<Alternative>();
    assert!(
        matches!(parsed, Err(crate::error::VartestError::InvalidAlternative(_))),
        "FALSIFIED FT-009: 'bogus' parsed as {parsed:?}"
    );
}

use amortization_core::comparison::{align_schedules, compare_schedules};
use amortization_core::schedule::{ExtraPayments, LoanTerms, ScheduleInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Baseline vs actual comparison
// ===========================================================================

fn car_loan(extras: ExtraPayments) -> ScheduleInput {
    ScheduleInput {
        principal: dec!(50000),
        periodic_rate: dec!(0.015),
        term_periods: 48,
        installment: None,
        extra_payments: extras,
    }
}

#[test]
fn test_lump_sum_saves_interest() {
    let extras: ExtraPayments = [(6, dec!(15000))].into_iter().collect();
    let result = compare_schedules(&car_loan(extras)).unwrap();
    let cmp = &result.result;

    assert_eq!(cmp.baseline.periods_elapsed, 48);
    assert!(cmp.actual.periods_elapsed < 48);
    assert!(cmp.actual.paid_off);
    assert_eq!(cmp.actual.total_extra_principal, dec!(15000));
    assert_eq!(
        cmp.interest_saved,
        cmp.baseline.total_interest - cmp.actual.total_interest
    );
    // Principal is repaid in full either way, so paid savings equal interest savings
    assert!((cmp.total_paid_saved - cmp.interest_saved).abs() < dec!(0.02));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_aligned_rows_match_ledgers() {
    let extras: ExtraPayments = [(1, dec!(20000))].into_iter().collect();
    let terms = LoanTerms::new(dec!(50000), dec!(0.015), 48).unwrap();
    let baseline = terms.schedule(&ExtraPayments::new()).unwrap();
    let actual = terms.schedule(&extras).unwrap();

    let rows = align_schedules(&baseline, &actual);
    assert_eq!(rows.len(), baseline.len());

    for (row, base) in rows.iter().zip(&baseline) {
        assert_eq!(row.period, base.period);
        assert_eq!(row.baseline_balance, base.balance_after);
        assert_eq!(row.baseline_cumulative_interest, base.cumulative_interest);
    }
    for (row, act) in rows.iter().zip(&actual) {
        assert_eq!(row.actual_balance, act.balance_after);
        assert_eq!(row.actual_installment, act.installment);
    }
    for row in &rows[actual.len()..] {
        assert_eq!(row.actual_total_paid, Decimal::ZERO);
        assert_eq!(row.actual_cumulative_interest, Decimal::ZERO);
    }
}

#[test]
fn test_comparison_warnings_follow_actual_schedule() {
    let extras: ExtraPayments = [(48, dec!(100000)), (60, dec!(5))].into_iter().collect();
    let result = compare_schedules(&car_loan(extras)).unwrap();
    assert!(result.warnings.iter().any(|w| w.starts_with("Period 48")));
    assert!(result.warnings.iter().any(|w| w.contains("period 60 is beyond")));
}

#[test]
fn test_overflowing_loan_is_an_error() {
    let mut input = car_loan(ExtraPayments::new());
    input.periodic_rate = dec!(0.20);
    input.term_periods = 360;
    input.installment = Some(Decimal::ZERO);
    assert!(matches!(
        compare_schedules(&input),
        Err(amortization_core::AmortizationError::Overflow { .. })
    ));
}

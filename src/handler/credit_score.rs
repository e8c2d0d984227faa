//! Credit scoring.
//!
//! A pure function of the applicant's figures: the repayment history and the
//! six-month bank flow produce two sub-scores, their weighted blend picks the
//! risk band, and the band fixes rate and decision. Remaining monthly income
//! sizes the loan.

use crate::{
    helpers::{format_inr, round_half_up, Decision, RiskBand},
    types::{ApplicantInput, ScoreResult},
};

const INCOME_SCORE_BASE: f64 = 50.0;
const SAVINGS_RATIO_WEIGHT: f64 = 40.0;
const INCOME_SCORE_MIN: f64 = 30.0;
const INCOME_SCORE_MAX: f64 = 90.0;

const REPAYMENT_WEIGHT: f64 = 0.6;
const INCOME_WEIGHT: f64 = 0.4;

const HIGH_NEED_SCORE: u32 = 75;
const HIGH_NEED_REMAINING_INCOME: f64 = 15000.0;
const LOW_NEED_SCORE: u32 = 70;
const LOW_NEED_REMAINING_INCOME: f64 = 10000.0;
const MEDIUM_RISK_SCORE: u32 = 55;
const HIGH_RISK_SCORE: u32 = 40;

const LOAN_INCOME_MULTIPLIER: f64 = 20.0;
const HEALTHY_SAVINGS_RATIO: f64 = 0.15;

/// Share of the six-month inflow that was not spent. Zero when there was no
/// inflow at all.
pub fn savings_ratio(inflow: f64, outflow: f64) -> f64 {
    if inflow > 0.0 {
        (inflow - outflow) / inflow
    } else {
        0.0
    }
}

/// Unrounded income score, always within `[30, 90]`.
pub fn raw_income_score(savings_ratio: f64) -> f64 {
    (INCOME_SCORE_BASE + savings_ratio * SAVINGS_RATIO_WEIGHT)
        .clamp(INCOME_SCORE_MIN, INCOME_SCORE_MAX)
}

pub fn composite_score(repayment_score: u32, raw_income_score: f64) -> u32 {
    let blended = f64::from(repayment_score) * REPAYMENT_WEIGHT
        + raw_income_score * INCOME_WEIGHT;
    round_half_up(blended) as u32
}

/// First matching rule wins. Only the two low-risk bands look at remaining
/// income.
pub fn risk_band(composite_score: u32, remaining_income: f64) -> RiskBand {
    if composite_score >= HIGH_NEED_SCORE
        && remaining_income >= HIGH_NEED_REMAINING_INCOME
    {
        RiskBand::LowRiskHighNeed
    } else if composite_score >= LOW_NEED_SCORE
        && remaining_income >= LOW_NEED_REMAINING_INCOME
    {
        RiskBand::LowRiskLowNeed
    } else if composite_score >= MEDIUM_RISK_SCORE {
        RiskBand::MediumRisk
    } else if composite_score >= HIGH_RISK_SCORE {
        RiskBand::HighRisk
    } else {
        RiskBand::VeryHighRisk
    }
}

pub fn tenure_months(composite_score: u32) -> u32 {
    if composite_score >= LOW_NEED_SCORE {
        24
    } else if composite_score >= MEDIUM_RISK_SCORE {
        18
    } else {
        12
    }
}

/// Twenty times the remaining monthly income, never below zero.
pub fn max_loan_amount(remaining_income: f64) -> f64 {
    round_half_up(remaining_income * LOAN_INCOME_MULTIPLIER).max(0.0)
}

/// Monthly instalment of an amortizing loan at `interest_rate` percent per
/// annum over `tenure_months`.
pub fn emi(amount: f64, interest_rate: f64, tenure_months: u32) -> f64 {
    if amount <= 0.0 || tenure_months == 0 {
        return 0.0;
    }

    let monthly_rate = interest_rate / 1200.0;
    if monthly_rate <= 0.0 {
        return amount / f64::from(tenure_months);
    }

    let n = f64::from(tenure_months);
    amount * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-n))
}

pub fn calculate(input: &ApplicantInput) -> ScoreResult {
    let repayment_score = input.history().score();
    let ratio = savings_ratio(input.bank_inflow_6m, input.bank_outflow_6m);
    let raw_income = raw_income_score(ratio);
    let income_score = round_half_up(raw_income) as u32;
    let composite_score = composite_score(repayment_score, raw_income);
    let remaining_income = input.monthly_income - input.monthly_expenses;

    let risk_band = risk_band(composite_score, remaining_income);
    let interest_rate = risk_band.interest_rate();
    let decision = risk_band.decision();
    let max_loan_amount = max_loan_amount(remaining_income);
    let tenure_months = tenure_months(composite_score);

    let explanation = explanation(&Summary {
        input,
        repayment_score,
        savings_ratio: ratio,
        income_score,
        composite_score,
        remaining_income,
        risk_band,
        max_loan_amount,
        interest_rate,
        tenure_months,
        decision,
    });

    ScoreResult {
        repayment_score,
        income_score,
        composite_score,
        risk_band,
        remaining_income,
        max_loan_amount,
        interest_rate,
        tenure_months,
        decision,
        explanation,
    }
}

struct Summary<'a> {
    input: &'a ApplicantInput,
    repayment_score: u32,
    savings_ratio: f64,
    income_score: u32,
    composite_score: u32,
    remaining_income: f64,
    risk_band: RiskBand,
    max_loan_amount: f64,
    interest_rate: f64,
    tenure_months: u32,
    decision: Decision,
}

fn explanation(s: &Summary<'_>) -> String {
    let capacity = if s.remaining_income >= HIGH_NEED_REMAINING_INCOME {
        "strong"
    } else if s.remaining_income >= LOW_NEED_REMAINING_INCOME {
        "moderate"
    } else {
        "limited"
    };
    let management = if s.savings_ratio > HEALTHY_SAVINGS_RATIO {
        "healthy"
    } else {
        "tight"
    };
    let net_flow = s.input.bank_inflow_6m - s.input.bank_outflow_6m;
    let instalment = round_half_up(emi(
        s.max_loan_amount,
        s.interest_rate,
        s.tenure_months,
    ));

    format!(
        "Based on the financial analysis:\n\
         \n\
         • Repayment History: {history} - Contributing {repayment}/100 to repayment score\n\
         • Monthly Remaining Income: ₹{remaining} indicates {capacity} repayment capacity\n\
         • Bank Statement Analysis: 6-month net flow of ₹{net_flow} shows {management} financial management\n\
         • Income Stability Score: {income}/100\n\
         \n\
         Risk Assessment: Your profile is classified as \"{band}\" with a composite credit score of {composite}/100.\n\
         \n\
         Loan Recommendation:\n\
         ✓ Maximum loan eligible: ₹{max_loan}\n\
         ✓ Recommended interest rate: {rate}% per annum\n\
         ✓ Suggested tenure: {tenure} months\n\
         ✓ Estimated EMI: ₹{emi}\n\
         \n\
         Decision: {decision}\n\
         {closing}",
        history = s.input.repayment_history,
        repayment = s.repayment_score,
        remaining = format_inr(s.remaining_income),
        capacity = capacity,
        net_flow = format_inr(net_flow),
        management = management,
        income = s.income_score,
        band = s.risk_band,
        composite = s.composite_score,
        max_loan = format_inr(s.max_loan_amount),
        rate = s.interest_rate,
        tenure = s.tenure_months,
        emi = format_inr(instalment),
        decision = s.decision,
        closing = s.decision.closing_sentence(),
    )
}

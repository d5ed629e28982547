//! Field extraction shared by every report writer.

use crate::core::StateProfile;

pub const MISSING: &str = "N/A";

/// The fixed attribute rows, in display order. Unknown states render `N/A`.
pub fn attribute_rows(profile: Option<&StateProfile>) -> Vec<(&'static str, String)> {
    let field = |get: fn(&StateProfile) -> &str| {
        profile
            .map(get)
            .filter(|value| !value.is_empty())
            .unwrap_or(MISSING)
            .to_string()
    };

    vec![
        ("Climate", field(|p| &p.climate)),
        ("Cost of Living", field(|p| &p.cost_of_living)),
        ("Politics", field(|p| &p.politics)),
        ("Healthcare", field(|p| &p.healthcare_quality)),
        ("Crime Level", field(|p| &p.crime_level)),
        ("Landscape", field(|p| &p.landscape)),
        ("Abortion Laws", field(|p| &p.abortion_laws)),
        ("Gun Laws", field(|p| &p.gun_laws)),
    ]
}

/// Extended rows; only fields the state actually has are returned.
pub fn optional_rows(profile: &StateProfile) -> Vec<(&'static str, String)> {
    let mut rows = Vec::new();
    if let Some(region) = &profile.region {
        rows.push(("Region", region.clone()));
    }
    if let Some(price) = profile.avg_home_price {
        rows.push(("Avg. Home Price", format_usd(price)));
    }
    if let Some(salary) = profile.avg_salary {
        rows.push(("Avg. Salary", format_usd(salary)));
    }
    if let Some(fact) = &profile.fun_fact {
        rows.push(("Fun Fact", fact.clone()));
    }
    rows
}

/// One-sentence explanation of why a state landed at `rank`.
pub fn rationale(rank: usize, profile: &StateProfile, city: &str) -> String {
    format!(
        "This location ranks #{rank} because it aligns strongly with your preferences for {} values, {} climate, and {} cost of living. {city} offers the best combination of your priorities within {}.",
        profile.politics.to_lowercase(),
        profile.climate.to_lowercase(),
        profile.cost_of_living.to_lowercase(),
        profile.state_name,
    )
}

/// Whole dollars with thousands separators, e.g. `$1,234,567`.
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

use crate::factors::schema::RiskPolicy;
use crate::model::RiskLevel;
use rust_decimal::Decimal;

/// Classify one product row. The first matching rule wins:
///
/// 1. per-unit factor above `high_unit_factor` and units above `high_unit_volume` -> High-Risk
/// 2. row total above `high_total` -> High-Risk
/// 3. row total above `critical_total` -> Critical
/// 4. otherwise Normal
pub fn classify_risk(
    emission_per_unit: Decimal,
    units: Decimal,
    total: Decimal,
    policy: &RiskPolicy,
) -> RiskLevel {
    if emission_per_unit > policy.high_unit_factor && units > policy.high_unit_volume {
        RiskLevel::HighRisk
    } else if total > policy.high_total {
        RiskLevel::HighRisk
    } else if total > policy.critical_total {
        RiskLevel::Critical
    } else {
        RiskLevel::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn classify(factor: Decimal, units: Decimal) -> RiskLevel {
        classify_risk(factor, units, factor * units, &RiskPolicy::default())
    }

    #[test]
    fn test_high_factor_high_volume() {
        // 3.5 * 101 = 353.5, below high_total but volume rule applies
        assert_eq!(classify(dec!(3.5), dec!(101)), RiskLevel::HighRisk);
    }

    #[test]
    fn test_volume_rule_is_strict() {
        // exactly 100 units does not trigger the volume rule
        assert_eq!(classify(dec!(3.5), dec!(100)), RiskLevel::Critical);
        // exactly factor 3 does not either, leaving only the total rules
        assert_eq!(classify(dec!(3), dec!(150)), RiskLevel::Critical);
    }

    #[test]
    fn test_high_total() {
        assert_eq!(classify(dec!(2.1), dec!(300)), RiskLevel::HighRisk);
    }

    #[test]
    fn test_total_thresholds_are_strict() {
        assert_eq!(classify(dec!(2), dec!(250)), RiskLevel::Critical);
        assert_eq!(classify(dec!(2), dec!(100)), RiskLevel::Normal);
    }

    #[test]
    fn test_critical_band() {
        assert_eq!(classify(dec!(8.2), dec!(40)), RiskLevel::Critical);
    }

    #[test]
    fn test_zero_factor_is_normal() {
        assert_eq!(classify(dec!(0), dec!(5000)), RiskLevel::Normal);
    }

    #[test]
    fn test_custom_policy() {
        let policy = RiskPolicy {
            high_unit_factor: dec!(1),
            high_unit_volume: dec!(10),
            high_total: dec!(1000),
            critical_total: dec!(50),
        };
        assert_eq!(
            classify_risk(dec!(1.9), dec!(20), dec!(38), &policy),
            RiskLevel::HighRisk
        );
        assert_eq!(
            classify_risk(dec!(1.9), dec!(5), dec!(9.5), &policy),
            RiskLevel::Normal
        );
    }
}

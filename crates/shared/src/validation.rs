//! Common validation utilities.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Largest quantity a single movement may carry.
pub const MAX_MOVEMENT_QUANTITY: i32 = 1_000_000;

/// Error code for a quantity above [`MAX_MOVEMENT_QUANTITY`].
pub const QUANTITY_TOO_LARGE: &str = "quantity_too_large";

/// Error code for a cost above [`MAX_COST`].
pub const COST_TOO_LARGE: &str = "cost_too_large";

/// Largest amount a `NUMERIC(14, 2)` cost column holds.
pub const MAX_COST: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Validates that a movement quantity is positive and within the per-movement cap.
pub fn validate_quantity(quantity: i32) -> Result<(), ValidationError> {
    if quantity <= 0 {
        let mut err = ValidationError::new("quantity_range");
        err.message = Some("Quantity must be a positive number.".into());
        return Err(err);
    }
    if quantity > MAX_MOVEMENT_QUANTITY {
        let mut err = ValidationError::new(QUANTITY_TOO_LARGE);
        err.message = Some(format!("Quantity cannot exceed {}.", MAX_MOVEMENT_QUANTITY).into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a monetary amount is not negative and fits the cost columns.
pub fn validate_cost(cost: &Decimal) -> Result<(), ValidationError> {
    if cost.is_sign_negative() && !cost.is_zero() {
        let mut err = ValidationError::new("cost_range");
        err.message = Some("Cost cannot be negative.".into());
        return Err(err);
    }
    if *cost > MAX_COST {
        let mut err = ValidationError::new(COST_TOO_LARGE);
        err.message = Some(format!("Cost cannot exceed {}.", MAX_COST).into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a string contains something other than whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value cannot be blank.".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_MOVEMENT_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_MOVEMENT_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_quantity_error_message() {
        let err = validate_quantity(0).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Quantity must be a positive number."
        );
    }

    #[test]
    fn test_quantity_over_cap_has_its_own_message() {
        let err = validate_quantity(MAX_MOVEMENT_QUANTITY + 1).unwrap_err();
        assert_eq!(err.code, QUANTITY_TOO_LARGE);
        assert_eq!(
            err.message.unwrap().to_string(),
            "Quantity cannot exceed 1000000."
        );
    }

    #[test]
    fn test_validate_cost() {
        assert!(validate_cost(&Decimal::ZERO).is_ok());
        assert!(validate_cost(&Decimal::from_str("100.50").unwrap()).is_ok());
        assert!(validate_cost(&Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_max_cost_matches_column_precision() {
        assert_eq!(MAX_COST, Decimal::from_str("999999999999.99").unwrap());
        assert!(validate_cost(&MAX_COST).is_ok());
    }

    #[test]
    fn test_cost_above_column_range_rejected() {
        let err = validate_cost(&Decimal::from_str("1000000000000.00").unwrap()).unwrap_err();
        assert_eq!(err.code, COST_TOO_LARGE);
        assert_eq!(
            err.message.unwrap().to_string(),
            "Cost cannot exceed 999999999999.99."
        );
        assert!(validate_cost(&Decimal::MAX).is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Fort Alpha").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }
}

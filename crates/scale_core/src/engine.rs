use serde::{Deserialize, Serialize};

use crate::good::{Good, Measure, Mode};

/// Number of sub-units (g or ml) in one base unit (kg or L).
pub const SUB_UNITS_PER_UNIT: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub value: f64,
    pub input_unit: Measure,
    pub output_unit: Measure,
}

/// Reads a user supplied amount. Only positive finite numbers are accepted.
pub fn parse_amount(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Some(value),
        _ => None,
    }
}

/// Converts `raw_input` for `good` in the direction given by `mode`.
///
/// Returns `None` when the input is not a positive finite number, or when the
/// result overflows or underflows out of the positive finite range. The result
/// is not rounded; display precision is up to the caller.
pub fn convert(good: &Good, mode: Mode, raw_input: &str) -> Option<ConversionResult> {
    let input = parse_amount(raw_input)?;

    let result = match mode {
        Mode::PriceToQuantity => ConversionResult {
            value: (input / good.price_per_unit) * SUB_UNITS_PER_UNIT,
            input_unit: Measure::Currency,
            output_unit: good.unit.sub_unit(),
        },
        Mode::QuantityToPrice => ConversionResult {
            value: (input / SUB_UNITS_PER_UNIT) * good.price_per_unit,
            input_unit: good.unit.sub_unit(),
            output_unit: Measure::Currency,
        },
    };

    if !(result.value.is_finite() && result.value > 0.0) {
        return None;
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use ulid::Ulid;

    use super::*;
    use crate::good::{Color, Unit};

    fn good(price_per_unit: f64, unit: Unit) -> Good {
        Good {
            id: Ulid::new(),
            name: "Turmeric Powder".into(),
            price_per_unit,
            unit,
            color: Color::Yellow,
        }
    }

    #[test]
    fn price_to_quantity_for_mass_goods() {
        let result = convert(&good(400.0, Unit::Kilogram), Mode::PriceToQuantity, "100").unwrap();

        assert_eq!(result.value, 250.0);
        assert_eq!(result.input_unit, Measure::Currency);
        assert_eq!(result.output_unit, Measure::Gram);
        assert_eq!(format!("{:.2}", result.value), "250.00");
    }

    #[test]
    fn quantity_to_price_for_mass_goods() {
        let result = convert(&good(400.0, Unit::Kilogram), Mode::QuantityToPrice, "250").unwrap();

        assert_eq!(result.value, 100.0);
        assert_eq!(result.input_unit, Measure::Gram);
        assert_eq!(result.output_unit, Measure::Currency);
        assert_eq!(format!("{:.2}", result.value), "100.00");
    }

    #[test]
    fn volume_goods_dispense_milliliters() {
        let oil = good(180.0, Unit::Liter);

        let to_quantity = convert(&oil, Mode::PriceToQuantity, "90").unwrap();
        assert_eq!(to_quantity.value, 500.0);
        assert_eq!(to_quantity.output_unit, Measure::Milliliter);

        let to_price = convert(&oil, Mode::QuantityToPrice, "500").unwrap();
        assert_eq!(to_price.input_unit, Measure::Milliliter);
        assert_eq!(to_price.value, 90.0);
    }

    #[test]
    fn rejects_non_positive_and_unparsable_input() {
        let g = good(400.0, Unit::Kilogram);

        for raw in ["0", "-5", "abc", "", "   ", "NaN", "inf", "-inf"] {
            assert_eq!(convert(&g, Mode::PriceToQuantity, raw), None, "input {:?}", raw);
            assert_eq!(convert(&g, Mode::QuantityToPrice, raw), None, "input {:?}", raw);
        }
    }

    #[test]
    fn rejects_results_outside_finite_range() {
        let dust = good(1e-300, Unit::Kilogram);
        assert_eq!(convert(&dust, Mode::PriceToQuantity, "1e300"), None);

        let gold = good(1e300, Unit::Kilogram);
        assert_eq!(convert(&gold, Mode::QuantityToPrice, "1e300"), None);
        assert_eq!(convert(&gold, Mode::PriceToQuantity, "1e-300"), None);
    }

    #[test]
    fn accepts_surrounding_whitespace() {
        assert_eq!(parse_amount(" 12.5\n"), Some(12.5));
    }

    #[test]
    fn conversion_round_trips() {
        let prices = [1.0, 7.5, 149.99, 400.0, 1234.56];
        let inputs = [0.01, 3.0, 100.0, 999.9, 25_000.0];

        for price in prices {
            let g = good(price, Unit::Kilogram);
            for input in inputs {
                let quantity = convert(&g, Mode::PriceToQuantity, &input.to_string()).unwrap();
                assert_eq!(quantity.value, (input / price) * 1000.0);

                let back = convert(&g, Mode::QuantityToPrice, &quantity.value.to_string()).unwrap();
                assert!(
                    (back.value - input).abs() <= 1e-9 * input.max(1.0),
                    "price {} input {} came back as {}",
                    price,
                    input,
                    back.value
                );
            }
        }
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let g = good(350.0, Unit::Kilogram);

        assert_eq!(
            convert(&g, Mode::PriceToQuantity, "42"),
            convert(&g, Mode::PriceToQuantity, "42")
        );
    }
}

//! Pricing engine. Pure decimal arithmetic; display rounding to two
//! decimals happens at the api boundary, never here.

use rust_decimal::Decimal;

use crate::model::entity::work_order::WorkOrderPart;

/// `base_price * (1 + markup_percent / 100)`.
pub fn apply_markup(base_price: Decimal, markup_percent: Decimal) -> Decimal {
    base_price + base_price * markup_percent / Decimal::ONE_HUNDRED
}

pub fn parts_subtotal(parts: &[WorkOrderPart]) -> Decimal {
    parts
        .iter()
        .map(|part| part.unit_price * Decimal::from(part.quantity))
        .sum()
}

pub fn labor_subtotal(labor_hours: Decimal, labor_rate: Decimal) -> Decimal {
    labor_hours * labor_rate
}

pub fn compute_total(parts: &[WorkOrderPart], labor_hours: Decimal, labor_rate: Decimal) -> Decimal {
    parts_subtotal(parts) + labor_subtotal(labor_hours, labor_rate)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn part(unit_price: &str, quantity: i32) -> WorkOrderPart {
        WorkOrderPart {
            part_id: Uuid::new_v4(),
            name: "Water pump".into(),
            unit_price: dec(unit_price),
            quantity,
        }
    }

    #[test]
    fn markup_is_exact() {
        assert_eq!(apply_markup(dec("245"), dec("12")), dec("274.40"));
        assert_eq!(apply_markup(dec("100"), dec("0")), dec("100"));
        assert_eq!(apply_markup(dec("19.99"), dec("15")), dec("22.9885"));
    }

    #[test]
    fn total_sums_parts_and_labor() {
        let parts = vec![part("274.40", 1), part("12.50", 4)];
        assert_eq!(
            compute_total(&parts, dec("2.5"), dec("145")),
            dec("274.40") + dec("50.00") + dec("362.50")
        );
    }

    #[test]
    fn empty_order_totals_zero() {
        assert_eq!(compute_total(&[], Decimal::ZERO, dec("145")), Decimal::ZERO);
    }

    #[test]
    fn quantity_scales_line_price() {
        assert_eq!(parts_subtotal(&[part("9.99", 3)]), dec("29.97"));
    }
}

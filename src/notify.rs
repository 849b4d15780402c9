//! Notification text and the presentation collaborators it relies on.
//!
//! The core writes the toast content; showing and dismissing it belongs to
//! the view. Money is rendered through a [`CurrencyFormatter`] so the view
//! can plug in its own locale.

use serde::Serialize;

use crate::money::{Money, MONEY_SCALE};
use crate::types::Outcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

/// Transient message: title plus description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn draw_completed(numbers: &[u32]) -> Self {
        let listed = numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            title: "Tirage effectué !".to_string(),
            description: format!("Vos numéros: {}", listed),
            variant: NotificationVariant::Default,
        }
    }

    /// A loss quotes the record's own wager.
    pub fn outcome_recorded(outcome: &Outcome, wager: Money, fmt: &dyn CurrencyFormatter) -> Self {
        if outcome.is_win {
            Self {
                title: "Gain enregistré !".to_string(),
                description: format!(
                    "Félicitations ! Vous avez gagné {}",
                    fmt.format(outcome.amount)
                ),
                variant: NotificationVariant::Default,
            }
        } else {
            Self {
                title: "Perte enregistrée".to_string(),
                description: format!("Vous avez perdu votre mise de {}", fmt.format(wager)),
                variant: NotificationVariant::Destructive,
            }
        }
    }
}

/// Renders amounts for display.
pub trait CurrencyFormatter {
    fn format(&self, amount: Money) -> String;
}

/// Toast service.
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

/// fr-FR euro rendering: `1 234,50 €`.
///
/// Uses a narrow no-break space for thousands and a no-break space before
/// the symbol, like `Intl.NumberFormat("fr-FR", { currency: "EUR" })`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuroFormatter;

impl CurrencyFormatter for EuroFormatter {
    fn format(&self, amount: Money) -> String {
        let cents = amount.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        let units = abs / MONEY_SCALE as u64;
        let frac = abs % MONEY_SCALE as u64;

        let digits = units.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('\u{202F}');
            }
            grouped.push(ch);
        }

        format!("{}{},{:02}\u{A0}€", sign, grouped, frac)
    }
}

/// Browser `Intl.NumberFormat` with euro currency style.
///
/// Falls back to [`EuroFormatter`] if the call does not return a string.
#[cfg(target_arch = "wasm32")]
pub struct IntlFormatter {
    format: js_sys::Function,
}

#[cfg(target_arch = "wasm32")]
impl IntlFormatter {
    pub fn new(locale: &str) -> Self {
        use wasm_bindgen::JsValue;

        let locales = js_sys::Array::of1(&JsValue::from_str(locale));
        let options = js_sys::Object::new();
        for (key, value) in [("style", "currency"), ("currency", "EUR")] {
            if let Err(e) = js_sys::Reflect::set(&options, &key.into(), &value.into()) {
                log::warn!("[Loto WASM] Intl option {} not set: {:?}", key, e);
            }
        }
        let number_format = js_sys::Intl::NumberFormat::new(&locales, &options);
        Self {
            format: number_format.format(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for IntlFormatter {
    fn default() -> Self {
        Self::new("fr-FR")
    }
}

#[cfg(target_arch = "wasm32")]
impl CurrencyFormatter for IntlFormatter {
    fn format(&self, amount: Money) -> String {
        let value = wasm_bindgen::JsValue::from_f64(amount.to_f64());
        self.format
            .call1(&wasm_bindgen::JsValue::NULL, &value)
            .ok()
            .and_then(|s| s.as_string())
            .unwrap_or_else(|| EuroFormatter.format(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euro_format() {
        let fmt = EuroFormatter;
        assert_eq!(fmt.format(Money::from_cents(200)), "2,00\u{A0}€");
        assert_eq!(fmt.format(Money::from_cents(-305)), "-3,05\u{A0}€");
        assert_eq!(fmt.format(Money::from_cents(123_456_789)), "1\u{202F}234\u{202F}567,89\u{A0}€");
        assert_eq!(fmt.format(Money::from_cents(100_000)), "1\u{202F}000,00\u{A0}€");
    }

    #[test]
    fn test_draw_completed_text() {
        let n = Notification::draw_completed(&[3, 17, 22, 30, 41, 48]);
        assert_eq!(n.title, "Tirage effectué !");
        assert_eq!(n.description, "Vos numéros: 3, 17, 22, 30, 41, 48");
        assert_eq!(n.variant, NotificationVariant::Default);
    }

    #[test]
    fn test_win_text() {
        let n = Notification::outcome_recorded(
            &Outcome::win(Money::from_cents(1000)),
            Money::from_cents(200),
            &EuroFormatter,
        );
        assert_eq!(n.title, "Gain enregistré !");
        assert_eq!(n.description, "Félicitations ! Vous avez gagné 10,00\u{A0}€");
        assert_eq!(n.variant, NotificationVariant::Default);
    }

    #[test]
    fn test_loss_quotes_wager() {
        let outcome = Outcome { is_win: false, amount: Money::from_cents(777) };
        let n = Notification::outcome_recorded(&outcome, Money::from_cents(350), &EuroFormatter);
        assert_eq!(n.title, "Perte enregistrée");
        assert_eq!(n.description, "Vous avez perdu votre mise de 3,50\u{A0}€");
        assert_eq!(n.variant, NotificationVariant::Destructive);
    }
}

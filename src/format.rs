use crate::data::task::parse_date;
use chrono::NaiveDate;

/// pt-BR calendar date (`dd/mm/yyyy`).
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => "Data inválida".to_string(),
    }
}

/// BRL currency with pt-BR separators, e.g. `R$ 1.234,56`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let units = cents / 100;
    let fraction = cents % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{fraction:02}")
}

/// Whole days from `today` until `due`. Zero when due today, negative once past.
pub fn days_remaining(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// "Faltam N dias" while time is left, "Vencida" from the due day on.
pub fn remaining_label(days: Option<i64>) -> String {
    match days {
        Some(n) if n > 0 => format!("Faltam {} dias", n),
        _ => "Vencida".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2099-01-01"), "01/01/2099");
        assert_eq!(format_date("2024-12-31"), "31/12/2024");
        assert_eq!(format_date("amanhã"), "Data inválida");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(12.5), "R$ 12,50");
        assert_eq!(format_currency(999.99), "R$ 999,99");
        assert_eq!(format_currency(1500.0), "R$ 1.500,00");
        assert_eq!(format_currency(1234567.891), "R$ 1.234.567,89");
        assert_eq!(format_currency(-42.0), "-R$ 42,00");
    }

    #[test]
    fn test_due_today_is_overdue() {
        let today = date(2026, 10, 16);
        let days = days_remaining(today, today);
        assert_eq!(days, 0);
        assert_eq!(remaining_label(Some(days)), "Vencida");
    }

    #[test]
    fn test_due_tomorrow() {
        let today = date(2026, 10, 16);
        let days = days_remaining(date(2026, 10, 17), today);
        assert_eq!(remaining_label(Some(days)), "Faltam 1 dias");
    }

    #[test]
    fn test_past_and_unknown_are_overdue() {
        let today = date(2026, 10, 16);
        assert_eq!(remaining_label(Some(days_remaining(date(2026, 1, 1), today))), "Vencida");
        assert_eq!(remaining_label(None), "Vencida");
    }
}

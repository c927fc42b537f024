//! Identifier namespace helpers.
//!
//! Source ids carry a namespace token (`printer/HP-LaserJet_4`,
//! `driver/hpijs`); cross-references sometimes omit it. These helpers keep
//! prefix handling in one place.

/// Namespace token for printer ids.
pub const PRINTER_PREFIX: &str = "printer/";

/// Namespace token for driver ids.
pub const DRIVER_PREFIX: &str = "driver/";

/// Returns `id` with the given namespace prefix, adding it when missing.
pub fn ensure_prefix(id: &str, prefix: &str) -> String {
    if id.starts_with(prefix) {
        id.to_string()
    } else {
        format!("{prefix}{id}")
    }
}

/// Returns `id` without the given namespace prefix, if present.
pub fn strip_namespace<'a>(id: &'a str, prefix: &str) -> &'a str {
    id.strip_prefix(prefix).unwrap_or(id)
}

/// Derives a (make, model) pair from a printer id.
///
/// The namespaced id is split at the first hyphen: the head becomes the make,
/// the remainder the model, with underscores rendered as spaces. An id with no
/// hyphen yields an empty model. Used when synthesizing placeholder records
/// for printers only known from a driver's side.
pub fn split_printer_id(id: &str) -> (String, String) {
    let name = strip_namespace(id, PRINTER_PREFIX);
    match name.split_once('-') {
        Some((make, model)) => (make.replace('_', " "), model.replace('_', " ")),
        None => (name.replace('_', " "), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_prefix() {
        assert_eq!(ensure_prefix("hpijs", DRIVER_PREFIX), "driver/hpijs");
        assert_eq!(ensure_prefix("driver/hpijs", DRIVER_PREFIX), "driver/hpijs");
    }

    #[test]
    fn test_strip_namespace() {
        assert_eq!(strip_namespace("printer/HP-LaserJet_4", PRINTER_PREFIX), "HP-LaserJet_4");
        assert_eq!(strip_namespace("HP-LaserJet_4", PRINTER_PREFIX), "HP-LaserJet_4");
    }

    #[test]
    fn test_split_printer_id() {
        let (make, model) = split_printer_id("printer/HP-LaserJet_4");
        assert_eq!(make, "HP");
        assert_eq!(model, "LaserJet 4");
    }

    #[test]
    fn test_split_keeps_later_hyphens_in_model() {
        let (make, model) = split_printer_id("printer/Epson-Stylus_Color-II");
        assert_eq!(make, "Epson");
        assert_eq!(model, "Stylus Color-II");
    }

    #[test]
    fn test_split_without_hyphen() {
        let (make, model) = split_printer_id("printer/Apple_LaserWriter");
        assert_eq!(make, "Apple LaserWriter");
        assert_eq!(model, "");
    }
}

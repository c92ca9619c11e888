use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::domain::{Analog, BalconyPresence, ANALOG_CAPACITY};
use crate::numeric::NumberInput;

#[derive(Debug, thiserror::Error)]
pub enum AnalogImportError {
    #[error("failed to read analog listing export: {0}")]
    Csv(#[from] csv::Error),
}

/// Build analog records from a listing export CSV.
///
/// Numeric cells stay raw text (the worksheet's tolerant parser owns
/// coercion), unknown balcony labels and blank cells become unset selections,
/// and rows beyond the worksheet capacity are dropped with a warning.
pub fn import_analogs<R: Read>(reader: R) -> Result<Vec<Analog>, AnalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut analogs = Vec::new();
    for record in csv_reader.deserialize::<AnalogRow>() {
        let row = record?;
        if analogs.len() == ANALOG_CAPACITY {
            tracing::warn!(
                capacity = ANALOG_CAPACITY,
                "listing export has more rows than the worksheet holds, extra rows ignored"
            );
            break;
        }
        analogs.push(row.into_analog());
    }

    tracing::debug!(count = analogs.len(), "imported analog listings");
    Ok(analogs)
}

#[derive(Debug, Deserialize)]
struct AnalogRow {
    #[serde(
        rename = "Offer Price (thousand)",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    offer_price_thousand: Option<String>,
    #[serde(rename = "Area (sqm)", default, deserialize_with = "empty_string_as_none")]
    area_sqm: Option<String>,
    #[serde(rename = "Units", default, deserialize_with = "empty_string_as_none")]
    units: Option<String>,
    #[serde(
        rename = "Wall Material",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    wall_material: Option<String>,
    #[serde(
        rename = "Building Condition",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    house_condition: Option<String>,
    #[serde(
        rename = "Interior Finish",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    flat_condition: Option<String>,
    #[serde(rename = "Floor Level", default, deserialize_with = "empty_string_as_none")]
    floor_level: Option<String>,
    #[serde(rename = "Balcony", default, deserialize_with = "empty_string_as_none")]
    balcony: Option<String>,
    #[serde(rename = "Listed On", default, deserialize_with = "empty_string_as_none")]
    listed_on: Option<String>,
}

impl AnalogRow {
    fn into_analog(self) -> Analog {
        Analog {
            offer_price_thousand: number_input(self.offer_price_thousand),
            area_sqm: number_input(self.area_sqm),
            units: number_input(self.units),
            wall_material: self.wall_material,
            house_condition: self.house_condition,
            flat_condition: self.flat_condition,
            floor_level: self.floor_level,
            balcony: self
                .balcony
                .as_deref()
                .and_then(BalconyPresence::from_label),
            listed_on: self.listed_on.as_deref().and_then(parse_listing_date),
            ..Analog::default()
        }
    }
}

fn number_input(raw: Option<String>) -> NumberInput {
    raw.map(NumberInput::Text).unwrap_or_default()
}

fn parse_listing_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric;

    const EXPORT: &str = "\
Offer Price (thousand),Area (sqm),Units,Wall Material,Building Condition,Interior Finish,Floor Level,Balcony,Listed On
5000,50,1,brick,good,standard finish,middle floors,present,2025-03-14
4600,44.2,1,panel,satisfactory,dated finish,first floor,no,
,,,,,,,maybe,not-a-date
";

    #[test]
    fn import_builds_analogs_with_unset_gaps() {
        let analogs = import_analogs(EXPORT.as_bytes()).expect("export parses");
        assert_eq!(analogs.len(), 3);

        let first = &analogs[0];
        assert_eq!(numeric::parse_number(&first.offer_price_thousand), 5000.0);
        assert_eq!(first.wall_material.as_deref(), Some("brick"));
        assert_eq!(first.balcony, Some(BalconyPresence::Present));
        assert_eq!(
            first.listed_on,
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );
        assert_eq!(first.adjustments.trade, 1.0);

        let second = &analogs[1];
        assert_eq!(second.balcony, Some(BalconyPresence::Absent));
        assert_eq!(second.listed_on, None);

        let third = &analogs[2];
        assert_eq!(numeric::parse_number(&third.offer_price_thousand), 0.0);
        assert_eq!(third.wall_material, None);
        assert_eq!(third.balcony, None, "unknown balcony label is unset");
        assert_eq!(third.listed_on, None);
    }

    #[test]
    fn import_caps_at_worksheet_capacity() {
        let mut export = String::from(
            "Offer Price (thousand),Area (sqm),Units,Wall Material,Building Condition,Interior Finish,Floor Level,Balcony,Listed On\n",
        );
        for row in 0..5 {
            export.push_str(&format!("{},{},1,,,,,,\n", 4000 + row * 100, 40 + row));
        }

        let analogs = import_analogs(export.as_bytes()).expect("export parses");
        assert_eq!(analogs.len(), ANALOG_CAPACITY);
    }
}

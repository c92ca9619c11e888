use serde::Serialize;

use super::tables::KeyMap;
use super::Handbook;
use crate::numeric;
use crate::worksheet::domain::{BalconyPresence, Subject};

/// All multiplier lookups round to four decimals; reproducibility of a
/// worksheet depends on this being identical across dimensions.
fn round_multiplier(value: f64) -> Option<f64> {
    value
        .is_finite()
        .then(|| (value * 10_000.0).round() / 10_000.0)
}

fn ratio_multiplier(subject: f64, comparable: f64, exponent: f64) -> Option<f64> {
    if !subject.is_finite() || !comparable.is_finite() || subject <= 0.0 || comparable <= 0.0 {
        return None;
    }
    round_multiplier((subject / comparable).powf(exponent))
}

/// Raw region label → canonical table key: direct hit first, alias second.
fn resolve_region_key<'a>(
    selected: &'a str,
    aliases: &'a KeyMap,
    in_table: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    if in_table(selected) {
        return Some(selected);
    }
    aliases.resolve(selected).filter(|alias| in_table(alias))
}

impl Handbook {
    // --- selection sources -------------------------------------------------

    pub fn regions(&self) -> Vec<&str> {
        self.trade_discounts.regions()
    }

    pub fn fund_categories(&self, region: &str) -> Vec<&str> {
        self.trade_discounts.funds(region)
    }

    // --- bargaining discount ----------------------------------------------

    pub fn trade_avg_percent(&self, region: &str, fund: &str) -> Option<f64> {
        let cell = self.trade_discounts.percent(region, fund)?;
        numeric::parse_percent(cell)
    }

    pub fn calc_trade_multiplier(&self, avg_percent: Option<f64>) -> Option<f64> {
        let percent = avg_percent?;
        round_multiplier(1.0 - self.trade_damping * percent / 100.0)
    }

    // --- area ratios -------------------------------------------------------

    pub fn calc_area_multiplier(&self, subject_area: f64, analog_area: f64) -> Option<f64> {
        ratio_multiplier(subject_area, analog_area, self.area_exponent)
    }

    pub fn calc_land_area_multiplier(&self, subject_land: f64, analog_land: f64) -> Option<f64> {
        let exponent = self.land_area_exponent?;
        ratio_multiplier(subject_land, analog_land, exponent)
    }

    // --- location ----------------------------------------------------------

    pub fn resolve_location_region_key<'a>(&'a self, selected: &'a str) -> Option<&'a str> {
        resolve_region_key(selected, &self.location_aliases, |key| {
            self.location.contains_region(key)
        })
    }

    pub fn resolve_location_fund_group_key(&self, fund: &str) -> Option<&str> {
        self.location_fund_groups.resolve(fund)
    }

    pub fn location_class_options(&self, region_key: &str, fund_key: &str) -> Vec<&str> {
        self.location.classes(region_key, fund_key)
    }

    pub fn calc_location_multiplier(
        &self,
        region_key: &str,
        fund_key: &str,
        class: &str,
    ) -> Option<f64> {
        round_multiplier(self.location.multiplier(region_key, fund_key, class)?)
    }

    // --- wall material -----------------------------------------------------

    pub fn resolve_walls_region_key<'a>(&'a self, selected: &'a str) -> Option<&'a str> {
        resolve_region_key(selected, &self.walls_aliases, |key| {
            self.walls.contains_region(key)
        })
    }

    pub fn resolve_walls_fund_group_key(&self, fund: &str) -> Option<&str> {
        self.walls_fund_groups.resolve(fund)
    }

    pub fn subject_wall_options(&self, region_key: &str, fund_key: &str) -> Vec<&str> {
        self.walls.subject_values(region_key, fund_key)
    }

    pub fn analog_wall_options(
        &self,
        region_key: &str,
        fund_key: &str,
        subject_wall: &str,
    ) -> Vec<&str> {
        self.walls.comparable_values(region_key, fund_key, subject_wall)
    }

    pub fn calc_walls_multiplier(
        &self,
        region_key: &str,
        fund_key: &str,
        subject_wall: &str,
        analog_wall: &str,
    ) -> Option<f64> {
        round_multiplier(
            self.walls
                .multiplier(region_key, fund_key, subject_wall, analog_wall)?,
        )
    }

    // --- building condition ------------------------------------------------

    pub fn resolve_house_condition_region_key<'a>(&'a self, selected: &'a str) -> Option<&'a str> {
        resolve_region_key(selected, &self.house_condition_aliases, |key| {
            self.house_condition.contains_region(key)
        })
    }

    pub fn resolve_house_condition_fund_group_key(&self, fund: &str) -> Option<&str> {
        self.house_condition_fund_groups.resolve(fund)
    }

    pub fn subject_house_condition_options(&self, region_key: &str, fund_key: &str) -> Vec<&str> {
        self.house_condition.subject_values(region_key, fund_key)
    }

    pub fn analog_house_condition_options(
        &self,
        region_key: &str,
        fund_key: &str,
        subject_condition: &str,
    ) -> Vec<&str> {
        self.house_condition
            .comparable_values(region_key, fund_key, subject_condition)
    }

    pub fn calc_house_condition_multiplier(
        &self,
        region_key: &str,
        fund_key: &str,
        subject_condition: &str,
        analog_condition: &str,
    ) -> Option<f64> {
        round_multiplier(self.house_condition.multiplier(
            region_key,
            fund_key,
            subject_condition,
            analog_condition,
        )?)
    }

    // --- interior finish (no fund-group level) ------------------------------

    pub fn resolve_flat_condition_region_key<'a>(&'a self, selected: &'a str) -> Option<&'a str> {
        resolve_region_key(selected, &self.flat_condition_aliases, |key| {
            self.flat_condition.contains_region(key)
        })
    }

    pub fn subject_flat_condition_options(&self, region_key: &str) -> Vec<&str> {
        self.flat_condition.subject_values(region_key)
    }

    pub fn analog_flat_condition_options(
        &self,
        region_key: &str,
        subject_condition: &str,
    ) -> Vec<&str> {
        self.flat_condition
            .comparable_values(region_key, subject_condition)
    }

    pub fn calc_flat_condition_multiplier(
        &self,
        region_key: &str,
        subject_condition: &str,
        analog_condition: &str,
    ) -> Option<f64> {
        round_multiplier(
            self.flat_condition
                .multiplier(region_key, subject_condition, analog_condition)?,
        )
    }

    // --- balcony / loggia ----------------------------------------------------

    /// Balcony data is bucketed coarser than the region list, so resolution
    /// goes through the alias map first instead of probing the table with the
    /// raw label.
    pub fn resolve_balcony_region_key(&self, selected: &str) -> Option<&str> {
        let bucket = self.balcony_aliases.resolve(selected)?;
        self.balcony.contains_region(bucket).then_some(bucket)
    }

    pub fn calc_balcony_multiplier(
        &self,
        region_key: &str,
        subject: BalconyPresence,
        analog: BalconyPresence,
    ) -> Option<f64> {
        let grid = self.balcony.grid(region_key)?;
        round_multiplier(grid.value(subject, analog))
    }

    // --- floor level ---------------------------------------------------------

    pub fn resolve_floor_region_key<'a>(&'a self, selected: &'a str) -> Option<&'a str> {
        resolve_region_key(selected, &self.floor_aliases, |key| {
            self.floor.contains_region(key)
        })
    }

    pub fn resolve_floor_fund_group_key(&self, fund: &str) -> Option<&str> {
        self.floor_fund_groups.resolve(fund)
    }

    pub fn subject_floor_options(&self, region_key: &str, fund_key: &str) -> Vec<&str> {
        let mut options = self.floor.subject_values(region_key, fund_key);
        if let Some(fallback) = self.floor_fallback_group.as_deref() {
            for extra in self.floor.subject_values(region_key, fallback) {
                if !options.contains(&extra) {
                    options.push(extra);
                }
            }
        }
        options
    }

    pub fn analog_floor_options(
        &self,
        region_key: &str,
        fund_key: &str,
        subject_floor: &str,
    ) -> Vec<&str> {
        let primary = self
            .floor
            .comparable_values(region_key, fund_key, subject_floor);
        if !primary.is_empty() {
            return primary;
        }
        match self.floor_fallback_group.as_deref() {
            Some(fallback) => self.floor.comparable_values(region_key, fallback, subject_floor),
            None => Vec::new(),
        }
    }

    /// Retries the basement/mezzanine group on a miss, mirroring
    /// [`Handbook::analog_floor_options`] so offered options and computed
    /// multipliers stay in lockstep.
    pub fn calc_floor_multiplier(
        &self,
        region_key: &str,
        fund_key: &str,
        subject_floor: &str,
        analog_floor: &str,
    ) -> Option<f64> {
        let value = self
            .floor
            .multiplier(region_key, fund_key, subject_floor, analog_floor)
            .or_else(|| {
                let fallback = self.floor_fallback_group.as_deref()?;
                self.floor
                    .multiplier(region_key, fallback, subject_floor, analog_floor)
            })?;
        round_multiplier(value)
    }

    // --- aggregated option view ---------------------------------------------

    /// Every option list the presentation layer needs for the current
    /// subject selections; unresolvable paths come back as empty lists.
    pub fn worksheet_options(&self, subject: &Subject) -> WorksheetOptions {
        let location = self
            .resolve_location_region_key(&subject.region)
            .zip(self.resolve_location_fund_group_key(&subject.fund));
        let walls = self
            .resolve_walls_region_key(&subject.region)
            .zip(self.resolve_walls_fund_group_key(&subject.fund));
        let house = self
            .resolve_house_condition_region_key(&subject.region)
            .zip(self.resolve_house_condition_fund_group_key(&subject.fund));
        let flat = self.resolve_flat_condition_region_key(&subject.region);
        let floor = self
            .resolve_floor_region_key(&subject.region)
            .zip(self.resolve_floor_fund_group_key(&subject.fund));

        WorksheetOptions {
            regions: owned(self.regions()),
            funds: owned(self.fund_categories(&subject.region)),
            location_classes: owned(
                location
                    .map(|(region, fund)| self.location_class_options(region, fund))
                    .unwrap_or_default(),
            ),
            subject_walls: owned(
                walls
                    .map(|(region, fund)| self.subject_wall_options(region, fund))
                    .unwrap_or_default(),
            ),
            analog_walls: owned(
                walls
                    .zip(subject.wall_material.as_deref())
                    .map(|((region, fund), wall)| self.analog_wall_options(region, fund, wall))
                    .unwrap_or_default(),
            ),
            subject_house_conditions: owned(
                house
                    .map(|(region, fund)| self.subject_house_condition_options(region, fund))
                    .unwrap_or_default(),
            ),
            analog_house_conditions: owned(
                house
                    .zip(subject.house_condition.as_deref())
                    .map(|((region, fund), condition)| {
                        self.analog_house_condition_options(region, fund, condition)
                    })
                    .unwrap_or_default(),
            ),
            subject_flat_conditions: owned(
                flat.map(|region| self.subject_flat_condition_options(region))
                    .unwrap_or_default(),
            ),
            analog_flat_conditions: owned(
                flat.zip(subject.flat_condition.as_deref())
                    .map(|(region, condition)| {
                        self.analog_flat_condition_options(region, condition)
                    })
                    .unwrap_or_default(),
            ),
            subject_floors: owned(
                floor
                    .map(|(region, fund)| self.subject_floor_options(region, fund))
                    .unwrap_or_default(),
            ),
            analog_floors: owned(
                floor
                    .zip(subject.floor_level.as_deref())
                    .map(|((region, fund), level)| self.analog_floor_options(region, fund, level))
                    .unwrap_or_default(),
            ),
        }
    }
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}

/// Option lists for populating selection controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorksheetOptions {
    pub regions: Vec<String>,
    pub funds: Vec<String>,
    pub location_classes: Vec<String>,
    pub subject_walls: Vec<String>,
    pub analog_walls: Vec<String>,
    pub subject_house_conditions: Vec<String>,
    pub analog_house_conditions: Vec<String>,
    pub subject_flat_conditions: Vec<String>,
    pub analog_flat_conditions: Vec<String>,
    pub subject_floors: Vec<String>,
    pub analog_floors: Vec<String>,
}

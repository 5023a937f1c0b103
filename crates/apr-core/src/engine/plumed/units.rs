use phf::{Map, phf_map};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum UnitError {
    #[error("Specified unit for {category} ('{value}') is not supported")]
    Unsupported {
        category: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnergyUnit {
    KilojoulePerMole,
    KilocaloriePerMole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Nanometer,
    Angstrom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Picosecond,
    Femtosecond,
    Nanosecond,
}

// "kJ/mol" is accepted as an alias and written back as "kj/mol".
static ENERGY_UNITS: Map<&'static str, EnergyUnit> = phf_map! {
    "kj/mol" => EnergyUnit::KilojoulePerMole,
    "kJ/mol" => EnergyUnit::KilojoulePerMole,
    "kcal/mol" => EnergyUnit::KilocaloriePerMole,
};

static LENGTH_UNITS: Map<&'static str, LengthUnit> = phf_map! {
    "nm" => LengthUnit::Nanometer,
    "A" => LengthUnit::Angstrom,
};

static TIME_UNITS: Map<&'static str, TimeUnit> = phf_map! {
    "ps" => TimeUnit::Picosecond,
    "fs" => TimeUnit::Femtosecond,
    "ns" => TimeUnit::Nanosecond,
};

fn lookup<T: Copy>(
    table: &Map<&'static str, T>,
    category: &'static str,
    value: &str,
) -> Result<T, UnitError> {
    table
        .get(value)
        .copied()
        .ok_or_else(|| UnitError::Unsupported {
            category,
            value: value.to_string(),
        })
}

impl EnergyUnit {
    /// Parses an energy unit. Both `kj/mol` and `kJ/mol` name the same unit.
    pub fn parse(value: &str) -> Result<Self, UnitError> {
        lookup(&ENERGY_UNITS, "energy", value)
    }

    /// The canonical spelling written to the header, always `kj/mol` for kilojoules.
    pub fn as_str(self) -> &'static str {
        match self {
            EnergyUnit::KilojoulePerMole => "kj/mol",
            EnergyUnit::KilocaloriePerMole => "kcal/mol",
        }
    }
}

impl LengthUnit {
    pub fn parse(value: &str) -> Result<Self, UnitError> {
        lookup(&LENGTH_UNITS, "length", value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LengthUnit::Nanometer => "nm",
            LengthUnit::Angstrom => "A",
        }
    }
}

impl TimeUnit {
    pub fn parse(value: &str) -> Result<Self, UnitError> {
        lookup(&TIME_UNITS, "time", value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Picosecond => "ps",
            TimeUnit::Femtosecond => "fs",
            TimeUnit::Nanosecond => "ns",
        }
    }
}

/// The unit triple written to the `UNITS` header of every window file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlumedUnits {
    pub energy: EnergyUnit,
    pub length: LengthUnit,
    pub time: TimeUnit,
}

impl Default for PlumedUnits {
    fn default() -> Self {
        Self {
            energy: EnergyUnit::KilocaloriePerMole,
            length: LengthUnit::Angstrom,
            time: TimeUnit::Nanosecond,
        }
    }
}

impl PlumedUnits {
    /// Parses the three unit strings, failing on the first unsupported one.
    pub fn parse(energy: &str, length: &str, time: &str) -> Result<Self, UnitError> {
        Ok(Self {
            energy: EnergyUnit::parse(energy)?,
            length: LengthUnit::parse(length)?,
            time: TimeUnit::parse(time)?,
        })
    }

    pub fn header_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PlumedUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UNITS LENGTH={} ENERGY={} TIME={}",
            self.length.as_str(),
            self.energy.as_str(),
            self.time.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_units_header() {
        assert_eq!(
            PlumedUnits::default().header_line(),
            "UNITS LENGTH=A ENERGY=kcal/mol TIME=ns"
        );
    }

    #[test]
    fn parses_supported_units() {
        let units = PlumedUnits::parse("kJ/mol", "nm", "ps").unwrap();
        assert_eq!(units.energy, EnergyUnit::KilojoulePerMole);
        assert_eq!(units.header_line(), "UNITS LENGTH=nm ENERGY=kj/mol TIME=ps");
        assert_eq!(TimeUnit::parse("fs").unwrap(), TimeUnit::Femtosecond);
    }

    #[test]
    fn rejects_unsupported_units_by_category() {
        assert_eq!(
            PlumedUnits::parse("hartree", "nm", "ps"),
            Err(UnitError::Unsupported {
                category: "energy",
                value: "hartree".to_string()
            })
        );
        assert!(matches!(
            PlumedUnits::parse("kcal/mol", "bohr", "ps"),
            Err(UnitError::Unsupported { category: "length", .. })
        ));
        assert!(matches!(
            PlumedUnits::parse("kcal/mol", "A", "s"),
            Err(UnitError::Unsupported { category: "time", .. })
        ));
    }

    #[test]
    fn kilojoule_alias_is_written_in_canonical_spelling() {
        assert_eq!(EnergyUnit::parse("kJ/mol"), EnergyUnit::parse("kj/mol"));
        assert_eq!(EnergyUnit::KilojoulePerMole.as_str(), "kj/mol");
    }

    #[test]
    fn unit_strings_must_match_exactly() {
        assert!(matches!(
            LengthUnit::parse(" nm"),
            Err(UnitError::Unsupported { category: "length", value }) if value == " nm"
        ));
        assert!(EnergyUnit::parse("KCAL/MOL").is_err());
    }
}

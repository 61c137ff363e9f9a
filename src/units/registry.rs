/// Physical dimension of a unit. Quantities only combine within one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Dimensionless,
    Mass,
    Volume,
    Count,
    /// Packaging units never convert into each other ("can" vs "jar").
    Package(&'static str),
}

/// A known unit with its factor relative to the dimension's base unit
/// (gram, milliliter, piece).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub name: &'static str,
    pub dimension: Dimension,
    pub factor: f64,
}

impl Unit {
    pub const DIMENSIONLESS: Unit = Unit {
        name: "",
        dimension: Dimension::Dimensionless,
        factor: 1.0,
    };

    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }
}

struct UnitDef {
    unit: Unit,
    aliases: &'static [&'static str],
}

const fn def(
    name: &'static str,
    dimension: Dimension,
    factor: f64,
    aliases: &'static [&'static str],
) -> UnitDef {
    UnitDef {
        unit: Unit {
            name,
            dimension,
            factor,
        },
        aliases,
    }
}

const fn package(name: &'static str, aliases: &'static [&'static str]) -> UnitDef {
    def(name, Dimension::Package(name), 1.0, aliases)
}

static UNITS: &[UnitDef] = &[
    // Mass, base gram
    def("gram", Dimension::Mass, 1.0, &["g", "gr", "grams"]),
    def("kilogram", Dimension::Mass, 1000.0, &["kg", "kgs", "kilograms"]),
    def("milligram", Dimension::Mass, 0.001, &["mg", "milligrams"]),
    def("ounce", Dimension::Mass, 28.349523125, &["oz", "ounces"]),
    def("pound", Dimension::Mass, 453.59237, &["lb", "lbs", "pounds"]),
    // Volume, base milliliter
    def("milliliter", Dimension::Volume, 1.0, &["ml", "milliliters", "millilitre"]),
    def("liter", Dimension::Volume, 1000.0, &["l", "liters", "litre", "litres"]),
    def("teaspoon", Dimension::Volume, 4.92892159375, &["tsp", "teaspoons"]),
    def("tablespoon", Dimension::Volume, 14.78676478125, &["tbsp", "tbs", "tablespoons"]),
    def("cup", Dimension::Volume, 236.5882365, &["cups", "c"]),
    def(
        "fluid_ounce",
        Dimension::Volume,
        29.5735295625,
        &["fl oz", "floz", "fl_oz", "fluid ounce", "fluid ounces", "fluid_ounces"],
    ),
    def("pint", Dimension::Volume, 473.176473, &["pt", "pints"]),
    def("quart", Dimension::Volume, 946.352946, &["qt", "quarts"]),
    def("gallon", Dimension::Volume, 3785.411784, &["gal", "gallons"]),
    // Counts, base piece
    def("piece", Dimension::Count, 1.0, &["pieces", "pc", "pcs", "each", "ea", "whole", "item", "items", "count"]),
    def("dozen", Dimension::Count, 12.0, &["dozens", "doz"]),
    package("can", &["cans"]),
    package("package", &["packages", "pkg", "pack", "packs"]),
    package("bag", &["bags"]),
    package("bunch", &["bunches"]),
    package("clove", &["cloves"]),
    package("slice", &["slices"]),
    package("jar", &["jars"]),
    package("bottle", &["bottles"]),
    package("box", &["boxes"]),
    package("stick", &["sticks"]),
    package("loaf", &["loaves"]),
    package("head", &["heads"]),
];

/// Find a unit by canonical name or alias, case-insensitively.
///
/// An empty name resolves to [`Unit::DIMENSIONLESS`].
pub fn lookup_unit(name: &str) -> Option<Unit> {
    let key = name.trim().to_lowercase();
    if key.is_empty() {
        return Some(Unit::DIMENSIONLESS);
    }
    UNITS
        .iter()
        .find(|d| d.unit.name == key || d.aliases.contains(&key.as_str()))
        .map(|d| d.unit)
}

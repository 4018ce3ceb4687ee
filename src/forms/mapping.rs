// forms/mapping.rs - Flat form keys to the nested property input
//
// The table below is the single source of truth for which form key feeds which
// field. `map_property_input` is a small interpreter over it.

use crate::database::models::property::PropertyInput;
use crate::forms::FormData;

/// Destination field inside `PropertyInput`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Type,
    Name,
    Description,
    LocationStreet,
    LocationCity,
    LocationState,
    LocationZipcode,
    Beds,
    Baths,
    SquareFeet,
    Amenities,
    RatesWeekly,
    RatesMonthly,
    RatesNightly,
    SellerName,
    SellerEmail,
    SellerPhone,
}

/// How many submitted values a key contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// First submitted value
    Single,
    /// Every submitted value, in order
    Repeated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub key: &'static str,
    pub target: Target,
    pub cardinality: Cardinality,
}

const fn single(key: &'static str, target: Target) -> FieldMapping {
    FieldMapping { key, target, cardinality: Cardinality::Single }
}

const fn repeated(key: &'static str, target: Target) -> FieldMapping {
    FieldMapping { key, target, cardinality: Cardinality::Repeated }
}

/// Rows are evaluated in order. When several rows share a target, the first
/// row whose key was submitted wins.
pub const PROPERTY_FIELDS: &[FieldMapping] = &[
    single("type", Target::Type),
    single("name", Target::Name),
    single("description", Target::Description),
    single("location.street", Target::LocationStreet),
    single("location.city", Target::LocationCity),
    single("location.state", Target::LocationState),
    single("location.zipcode", Target::LocationZipcode),
    single("beds", Target::Beds),
    single("baths", Target::Baths),
    single("square_feet", Target::SquareFeet),
    repeated("amenities", Target::Amenities),
    single("rates.weekly", Target::RatesWeekly),
    single("rates.monthly", Target::RatesMonthly),
    single("rates.nightly", Target::RatesNightly),
    // Legacy editor forms post the nightly rate under a trailing-dot key.
    single("rates.nightly.", Target::RatesNightly),
    single("seller_info.name", Target::SellerName),
    single("seller_info.email", Target::SellerEmail),
    single("seller_info.phone", Target::SellerPhone),
];

/// Build a `PropertyInput` from submitted form data using `PROPERTY_FIELDS`.
///
/// Total over any input: absent keys leave the field empty and unknown keys
/// (including `owner`) are ignored.
pub fn map_property_input(form: &FormData) -> PropertyInput {
    map_with(PROPERTY_FIELDS, form)
}

fn map_with(table: &[FieldMapping], form: &FormData) -> PropertyInput {
    let mut input = PropertyInput::default();

    for row in table {
        let values = match row.cardinality {
            Cardinality::Single => form.get(row.key).into_iter().collect(),
            Cardinality::Repeated => form.get_all(row.key),
        };
        if values.is_empty() {
            continue;
        }

        match slot(&mut input, row.target) {
            Slot::Scalar(field) => {
                if field.is_none() {
                    *field = values.first().map(|v| v.to_string());
                }
            }
            Slot::List(list) => {
                if list.is_empty() {
                    list.extend(values.into_iter().map(str::to_string));
                }
            }
        }
    }

    input
}

enum Slot<'a> {
    Scalar(&'a mut Option<String>),
    List(&'a mut Vec<String>),
}

fn slot(input: &mut PropertyInput, target: Target) -> Slot<'_> {
    match target {
        Target::Type => Slot::Scalar(&mut input.property_type),
        Target::Name => Slot::Scalar(&mut input.name),
        Target::Description => Slot::Scalar(&mut input.description),
        Target::LocationStreet => Slot::Scalar(&mut input.location.street),
        Target::LocationCity => Slot::Scalar(&mut input.location.city),
        Target::LocationState => Slot::Scalar(&mut input.location.state),
        Target::LocationZipcode => Slot::Scalar(&mut input.location.zipcode),
        Target::Beds => Slot::Scalar(&mut input.beds),
        Target::Baths => Slot::Scalar(&mut input.baths),
        Target::SquareFeet => Slot::Scalar(&mut input.square_feet),
        Target::Amenities => Slot::List(&mut input.amenities),
        Target::RatesWeekly => Slot::Scalar(&mut input.rates.weekly),
        Target::RatesMonthly => Slot::Scalar(&mut input.rates.monthly),
        Target::RatesNightly => Slot::Scalar(&mut input.rates.nightly),
        Target::SellerName => Slot::Scalar(&mut input.seller_info.name),
        Target::SellerEmail => Slot::Scalar(&mut input.seller_info.email),
        Target::SellerPhone => Slot::Scalar(&mut input.seller_info.phone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().copied().collect()
    }

    fn full_form() -> FormData {
        form(&[
            ("type", "Apartment"),
            ("name", "Harbor View"),
            ("description", "Two rooms by the water"),
            ("location.street", "1 Pier Rd"),
            ("location.city", "Boston"),
            ("location.state", "MA"),
            ("location.zipcode", "02110"),
            ("beds", "2"),
            ("baths", "1"),
            ("square_feet", "900"),
            ("amenities", "pool"),
            ("amenities", "wifi"),
            ("rates.weekly", "700"),
            ("rates.monthly", "2500"),
            ("rates.nightly", "120"),
            ("seller_info.name", "Dana"),
            ("seller_info.email", "dana@example.com"),
            ("seller_info.phone", "555-0100"),
        ])
    }

    #[test]
    fn maps_dotted_keys_into_nested_fields() {
        let input = map_property_input(&full_form());

        assert_eq!(input.property_type.as_deref(), Some("Apartment"));
        assert_eq!(input.name.as_deref(), Some("Harbor View"));
        assert_eq!(input.location.street.as_deref(), Some("1 Pier Rd"));
        assert_eq!(input.location.city.as_deref(), Some("Boston"));
        assert_eq!(input.location.state.as_deref(), Some("MA"));
        assert_eq!(input.location.zipcode.as_deref(), Some("02110"));
        assert_eq!(input.beds.as_deref(), Some("2"));
        assert_eq!(input.square_feet.as_deref(), Some("900"));
        assert_eq!(input.rates.weekly.as_deref(), Some("700"));
        assert_eq!(input.rates.monthly.as_deref(), Some("2500"));
        assert_eq!(input.rates.nightly.as_deref(), Some("120"));
        assert_eq!(input.seller_info.email.as_deref(), Some("dana@example.com"));
        assert_eq!(input.seller_info.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn amenities_keep_submission_order() {
        let input = map_property_input(&form(&[
            ("amenities", "wifi"),
            ("name", "x"),
            ("amenities", "pool"),
            ("amenities", "wifi"),
        ]));
        assert_eq!(input.amenities, vec!["wifi", "pool", "wifi"]);
    }

    #[test]
    fn missing_keys_stay_empty() {
        let input = map_property_input(&form(&[("name", "Only a name")]));

        assert_eq!(input.name.as_deref(), Some("Only a name"));
        assert_eq!(input.description, None);
        assert_eq!(input.location.city, None);
        assert_eq!(input.rates.nightly, None);
        assert!(input.amenities.is_empty());
    }

    #[test]
    fn empty_form_maps_to_default_input() {
        assert_eq!(map_property_input(&FormData::new()), PropertyInput::default());
    }

    #[test]
    fn single_keys_take_first_value() {
        let input = map_property_input(&form(&[("name", "first"), ("name", "second")]));
        assert_eq!(input.name.as_deref(), Some("first"));
    }

    #[test]
    fn legacy_trailing_dot_nightly_key_is_accepted() {
        let input = map_property_input(&form(&[("rates.nightly.", "85")]));
        assert_eq!(input.rates.nightly.as_deref(), Some("85"));
    }

    #[test]
    fn canonical_nightly_key_wins_over_legacy() {
        let input = map_property_input(&form(&[("rates.nightly.", "85"), ("rates.nightly", "90")]));
        assert_eq!(input.rates.nightly.as_deref(), Some("90"));
    }

    #[test]
    fn owner_and_unknown_keys_are_ignored() {
        let with_owner = form(&[("name", "x"), ("owner", "intruder"), ("rates.hourly", "5")]);
        let without = form(&[("name", "x")]);
        assert_eq!(map_property_input(&with_owner), map_property_input(&without));
    }

    #[test]
    fn mapping_is_deterministic() {
        let form = full_form();
        assert_eq!(map_property_input(&form), map_property_input(&form));
    }

    #[test]
    fn every_target_is_reachable_from_the_table() {
        let targets: std::collections::HashSet<Target> =
            PROPERTY_FIELDS.iter().map(|row| row.target).collect();
        assert_eq!(targets.len(), 17);
    }

    #[test]
    fn custom_table_without_legacy_row_drops_trailing_dot_key() {
        let strict: Vec<FieldMapping> = PROPERTY_FIELDS
            .iter()
            .copied()
            .filter(|row| row.key != "rates.nightly.")
            .collect();

        let input = map_with(&strict, &form(&[("rates.nightly.", "85")]));
        assert_eq!(input.rates.nightly, None);
    }
}

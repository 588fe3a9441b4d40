//! The mapping engine: converts one decoded source record into zero or more
//! destination rows.
//!
//! Pure and stateless: no I/O, no mutation of the record. Each source file
//! kind carries exactly one rule. Files with nested payloads explode one
//! record into a row per array element; their flat shape is intentionally
//! unmapped. Rows always cover their destination table's full column set,
//! with nulls for anything the record does not carry.

use serde_json::Value;

use crate::parser::Record;

use super::source::SourceFile;
use super::value::{
    boolean_or, int, int_or, key, localized, localized_value, position, real,
    split_attribute_value, text, Row, SqlValue,
};

/// Map a record from the given source file to its destination rows. The
/// destination table is `file.table()`.
pub fn map_record(file: SourceFile, record: &Record) -> Vec<Row> {
    match file {
        SourceFile::Categories => vec![map_categories(record)],
        SourceFile::Groups => vec![map_groups(record)],
        SourceFile::MetaGroups => vec![map_meta_groups(record)],
        SourceFile::TypesMeta => map_types_meta(record),
        SourceFile::Types => vec![map_types(record)],
        SourceFile::MarketGroups => vec![map_market_groups(record)],
        SourceFile::TypeMaterials => map_type_materials(record),
        SourceFile::TypeReactions => map_type_reactions(record),
        SourceFile::Flags => vec![map_flags(record)],
        SourceFile::MapRegions => vec![map_map_regions(record)],
        SourceFile::MapConstellations => vec![map_map_constellations(record)],
        SourceFile::MapSolarSystems => vec![map_map_solar_systems(record)],
        SourceFile::MapStars => vec![map_map_stars(record)],
        SourceFile::MapPlanets => vec![map_map_planets(record)],
        SourceFile::MapMoons => vec![map_map_moons(record)],
        SourceFile::Factions => vec![map_factions(record)],
        SourceFile::ContrabandTypes => map_contraband_types(record),
        SourceFile::NpcStations => vec![map_npc_stations(record)],
        SourceFile::ControlTowerResources => map_control_tower_resources(record),
        SourceFile::ControlTowerResourcePurposes => {
            vec![map_control_tower_resource_purposes(record)]
        }
        SourceFile::DogmaAttributes => vec![map_dogma_attributes(record)],
        SourceFile::DogmaEffects => vec![map_dogma_effects(record)],
        SourceFile::TypeDogma => map_type_dogma(record),
        SourceFile::TypeDogmaEffects => map_type_dogma_effects(record),
        SourceFile::CorporationActivities => vec![map_corporation_activities(record)],
        SourceFile::PlanetSchematics => vec![map_planet_schematics(record)],
    }
}

/// Passthrough rule for records with no dedicated mapping: `_key` becomes
/// `id`, objects carrying an `en` key resolve through the language rule,
/// everything else copies as-is.
pub fn map_default(record: &Record) -> Row {
    let mut row = Row::new();
    for (field, val) in record {
        if field == "_key" {
            row.set("id", SqlValue::from_json(val));
        } else if val.as_object().is_some_and(|o| o.contains_key("en")) {
            row.set(field, localized_value(Some(val)));
        } else {
            row.set(field, SqlValue::from_json(val));
        }
    }
    row
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

fn map_categories(record: &Record) -> Row {
    Row::new()
        .with("categoryID", key(record))
        .with("categoryName", localized(record, "name"))
        .with("iconID", int(record, "iconID"))
        .with("published", boolean_or(record, "published", false))
}

fn map_groups(record: &Record) -> Row {
    Row::new()
        .with("groupID", key(record))
        .with("categoryID", int(record, "categoryID"))
        .with("groupName", localized(record, "name"))
        .with("iconID", int(record, "iconID"))
        .with("useBasePrice", boolean_or(record, "useBasePrice", false))
        .with("anchored", boolean_or(record, "anchored", false))
        .with("anchorable", boolean_or(record, "anchorable", false))
        .with(
            "fittableNonSingleton",
            boolean_or(record, "fittableNonSingleton", false),
        )
        .with("published", boolean_or(record, "published", false))
}

fn map_meta_groups(record: &Record) -> Row {
    Row::new()
        .with("metaGroupID", key(record))
        .with("metaGroupName", localized(record, "name"))
        .with("description", localized(record, "description"))
        .with("iconID", int(record, "iconID"))
}

/// Second pass over `types.jsonl`: meta-group membership. Types without a
/// meta group produce no row.
fn map_types_meta(record: &Record) -> Vec<Row> {
    if !record.contains_key("metaGroupID") {
        return Vec::new();
    }

    vec![Row::new()
        .with("typeID", key(record))
        .with("parentTypeID", key(record))
        .with("metaGroupID", int(record, "metaGroupID"))]
}

fn map_types(record: &Record) -> Row {
    Row::new()
        .with("typeID", key(record))
        .with("groupID", int(record, "groupID"))
        .with("typeName", localized(record, "name"))
        .with("description", localized(record, "description"))
        .with("mass", real(record, "mass"))
        .with("volume", real(record, "volume"))
        .with("capacity", real(record, "capacity"))
        .with("portionSize", int_or(record, "portionSize", 1))
        .with("raceID", int(record, "raceID"))
        .with("basePrice", real(record, "basePrice"))
        .with("published", boolean_or(record, "published", false))
        .with("marketGroupID", int(record, "marketGroupID"))
        .with("iconID", int(record, "iconID"))
        .with("soundID", int(record, "soundID"))
        .with("graphicID", int(record, "graphicID"))
}

fn map_market_groups(record: &Record) -> Row {
    Row::new()
        .with("marketGroupID", key(record))
        .with("parentGroupID", int(record, "parentGroupID"))
        .with("marketGroupName", localized(record, "name"))
        .with("description", localized(record, "description"))
        .with("iconID", int(record, "iconID"))
        .with("hasTypes", boolean_or(record, "hasTypes", false))
}

/// `{"_key": typeID, "materials": [{materialTypeID, quantity}, ...]}` —
/// one row per material; empty or absent array yields nothing.
fn map_type_materials(record: &Record) -> Vec<Row> {
    explode(record, "materials", |parent, material| {
        Row::new()
            .with("typeID", parent.clone())
            .with("materialTypeID", int(material, "materialTypeID"))
            .with("quantity", int(material, "quantity"))
    })
}

/// Reaction inputs and outputs flatten into one table with an `input` flag.
fn map_type_reactions(record: &Record) -> Vec<Row> {
    let mut rows = explode(record, "inputs", |parent, input| {
        Row::new()
            .with("reactionTypeID", parent.clone())
            .with("input", SqlValue::Boolean(true))
            .with("typeID", key(input))
            .with("quantity", int(input, "quantity"))
    });
    rows.extend(explode(record, "outputs", |parent, output| {
        Row::new()
            .with("reactionTypeID", parent.clone())
            .with("input", SqlValue::Boolean(false))
            .with("typeID", key(output))
            .with("quantity", int(output, "quantity"))
    }));
    rows
}

fn map_flags(record: &Record) -> Row {
    Row::new()
        .with("flagID", key(record))
        .with("flagName", localized(record, "name"))
        .with("flagText", localized(record, "text"))
        .with("orderID", int(record, "order"))
}

fn map_contraband_types(record: &Record) -> Vec<Row> {
    explode(record, "factions", |parent, faction| {
        Row::new()
            .with("typeID", parent.clone())
            .with("factionID", key(faction))
            .with("standingLoss", real(faction, "standingLoss"))
            .with("confiscateMinSec", real(faction, "confiscateMinSec"))
            .with("fineByValue", real(faction, "fineByValue"))
            .with("attackMinSec", real(faction, "attackMinSec"))
    })
}

fn map_control_tower_resources(record: &Record) -> Vec<Row> {
    explode(record, "resources", |parent, resource| {
        Row::new()
            .with("controlTowerTypeID", parent.clone())
            .with("resourceTypeID", int(resource, "resourceTypeID"))
            .with("purpose", int(resource, "purpose"))
            .with("quantity", int(resource, "quantity"))
            .with("minSecurityLevel", real(resource, "minSecurityLevel"))
            .with("factionID", int(resource, "factionID"))
    })
}

fn map_control_tower_resource_purposes(record: &Record) -> Row {
    Row::new()
        .with("purpose", key(record))
        .with("purposeText", localized(record, "name"))
}

// ---------------------------------------------------------------------------
// Universe map (denormalized merge table)
//
// Six files feed mapDenormalize, each tagged with its fixed group and the
// hierarchy keys it knows about. Every rule emits the table's full column
// set; columns a kind does not carry stay null, and the merge upsert keeps
// whatever an earlier file wrote there.
// ---------------------------------------------------------------------------

const GROUP_REGION: i64 = 3;
const GROUP_CONSTELLATION: i64 = 4;
const GROUP_SOLAR_SYSTEM: i64 = 5;
const GROUP_STAR: i64 = 6;
const GROUP_PLANET: i64 = 7;
const GROUP_MOON: i64 = 8;

#[allow(clippy::too_many_arguments)]
fn denormalize_row(
    item_id: SqlValue,
    type_id: SqlValue,
    group_id: i64,
    region_id: SqlValue,
    constellation_id: SqlValue,
    solar_system_id: SqlValue,
    item_name: SqlValue,
    x: SqlValue,
    y: SqlValue,
    z: SqlValue,
    security: SqlValue,
    radius: SqlValue,
) -> Row {
    Row::new()
        .with("itemID", item_id)
        .with("typeID", type_id)
        .with("groupID", SqlValue::Integer(group_id))
        .with("regionID", region_id)
        .with("constellationID", constellation_id)
        .with("solarSystemID", solar_system_id)
        .with("itemName", item_name)
        .with("x", x)
        .with("y", y)
        .with("z", z)
        .with("security", security)
        .with("radius", radius)
}

fn map_map_regions(record: &Record) -> Row {
    denormalize_row(
        key(record),
        key(record),
        GROUP_REGION,
        key(record),
        SqlValue::Null,
        SqlValue::Null,
        localized(record, "name"),
        position(record, "x", Some(0.0)),
        position(record, "y", Some(0.0)),
        position(record, "z", Some(0.0)),
        SqlValue::Null,
        SqlValue::Null,
    )
}

fn map_map_constellations(record: &Record) -> Row {
    denormalize_row(
        key(record),
        key(record),
        GROUP_CONSTELLATION,
        int(record, "regionID"),
        key(record),
        SqlValue::Null,
        localized(record, "name"),
        position(record, "x", Some(0.0)),
        position(record, "y", Some(0.0)),
        position(record, "z", Some(0.0)),
        SqlValue::Null,
        SqlValue::Null,
    )
}

fn map_map_solar_systems(record: &Record) -> Row {
    // The system's display type is its star's type where present.
    let star_type = record
        .get("star")
        .and_then(|star| star.get("typeID"))
        .and_then(Value::as_i64)
        .map(SqlValue::Integer)
        .unwrap_or_else(|| key(record));

    denormalize_row(
        key(record),
        star_type,
        GROUP_SOLAR_SYSTEM,
        int(record, "regionID"),
        int(record, "constellationID"),
        key(record),
        localized(record, "name"),
        position(record, "x", Some(0.0)),
        position(record, "y", Some(0.0)),
        position(record, "z", Some(0.0)),
        real(record, "security"),
        SqlValue::Null,
    )
}

fn map_map_stars(record: &Record) -> Row {
    denormalize_row(
        key(record),
        int(record, "typeID"),
        GROUP_STAR,
        SqlValue::Null,
        SqlValue::Null,
        int(record, "solarSystemID"),
        localized(record, "name"),
        SqlValue::Null,
        SqlValue::Null,
        SqlValue::Null,
        SqlValue::Null,
        real(record, "radius"),
    )
}

fn map_map_planets(record: &Record) -> Row {
    denormalize_row(
        key(record),
        int(record, "typeID"),
        GROUP_PLANET,
        SqlValue::Null,
        SqlValue::Null,
        int(record, "solarSystemID"),
        localized(record, "name"),
        SqlValue::Null,
        SqlValue::Null,
        SqlValue::Null,
        SqlValue::Null,
        SqlValue::Null,
    )
}

fn map_map_moons(record: &Record) -> Row {
    denormalize_row(
        key(record),
        int(record, "typeID"),
        GROUP_MOON,
        SqlValue::Null,
        SqlValue::Null,
        int(record, "solarSystemID"),
        localized(record, "name"),
        position(record, "x", Some(0.0)),
        position(record, "y", Some(0.0)),
        position(record, "z", Some(0.0)),
        SqlValue::Null,
        SqlValue::Null,
    )
}

// ---------------------------------------------------------------------------
// Factions and stations
// ---------------------------------------------------------------------------

fn map_factions(record: &Record) -> Row {
    Row::new()
        .with("factionID", key(record))
        .with("factionName", localized(record, "name"))
        .with("description", localized(record, "description"))
        .with("solarSystemID", int(record, "solarSystemID"))
        .with("corporationID", int(record, "corporationID"))
        .with("sizeFactor", real(record, "sizeFactor"))
        .with("stationCount", int(record, "stationCount"))
        .with("stationSystemCount", int(record, "stationSystemCount"))
        .with("militiaCorporationID", int(record, "militiaCorporationID"))
        .with("iconID", int(record, "iconID"))
}

fn map_npc_stations(record: &Record) -> Row {
    Row::new()
        .with("stationID", key(record))
        .with("security", real(record, "security"))
        .with("dockingCostPerVolume", real(record, "dockingCostPerVolume"))
        .with(
            "maxShipVolumeDockable",
            real(record, "maxShipVolumeDockable"),
        )
        .with("officeRentalCost", real(record, "officeRentalCost"))
        .with("operationID", int(record, "operationID"))
        .with("stationTypeID", int(record, "stationTypeID"))
        .with("corporationID", int(record, "corporationID"))
        .with("solarSystemID", int(record, "solarSystemID"))
        .with("constellationID", int(record, "constellationID"))
        .with("regionID", int(record, "regionID"))
        .with("stationName", localized(record, "name"))
        .with("x", position(record, "x", None))
        .with("y", position(record, "y", None))
        .with("z", position(record, "z", None))
        .with(
            "reprocessingEfficiency",
            real(record, "reprocessingEfficiency"),
        )
        .with(
            "reprocessingStationsTake",
            real(record, "reprocessingStationsTake"),
        )
        .with(
            "reprocessingHangarFlag",
            int(record, "reprocessingHangarFlag"),
        )
}

// ---------------------------------------------------------------------------
// Dogma
// ---------------------------------------------------------------------------

fn map_dogma_attributes(record: &Record) -> Row {
    Row::new()
        .with("attributeID", key(record))
        .with("attributeName", localized(record, "name"))
        .with("description", localized(record, "description"))
        .with("iconID", int(record, "iconID"))
        .with("defaultValue", real(record, "defaultValue"))
        .with("published", boolean_or(record, "published", false))
        .with("displayName", localized(record, "displayName"))
        .with("unitID", int(record, "unitID"))
        .with("stackable", boolean_or(record, "stackable", false))
        .with("highIsGood", boolean_or(record, "highIsGood", false))
        .with("categoryID", int(record, "categoryID"))
}

fn map_dogma_effects(record: &Record) -> Row {
    let modifier_info = record
        .get("modifierInfo")
        .map(|v| SqlValue::Text(v.to_string()))
        .unwrap_or(SqlValue::Null);

    Row::new()
        .with("effectID", key(record))
        .with("effectName", localized(record, "name"))
        .with("effectCategory", int(record, "category"))
        .with("preExpression", int(record, "preExpression"))
        .with("postExpression", int(record, "postExpression"))
        .with("description", localized(record, "description"))
        .with("guid", text(record, "guid"))
        .with("iconID", int(record, "iconID"))
        .with("isOffensive", boolean_or(record, "isOffensive", false))
        .with("isAssistance", boolean_or(record, "isAssistance", false))
        .with("durationAttributeID", int(record, "durationAttributeID"))
        .with(
            "trackingSpeedAttributeID",
            int(record, "trackingSpeedAttributeID"),
        )
        .with("dischargeAttributeID", int(record, "dischargeAttributeID"))
        .with("rangeAttributeID", int(record, "rangeAttributeID"))
        .with("falloffAttributeID", int(record, "falloffAttributeID"))
        .with(
            "disallowAutoRepeat",
            boolean_or(record, "disallowAutoRepeat", false),
        )
        .with("published", boolean_or(record, "published", false))
        .with("displayName", localized(record, "displayName"))
        .with("isWarpSafe", boolean_or(record, "isWarpSafe", false))
        .with("rangeChance", boolean_or(record, "rangeChance", false))
        .with(
            "electronicChance",
            boolean_or(record, "electronicChance", false),
        )
        .with(
            "propulsionChance",
            boolean_or(record, "propulsionChance", false),
        )
        .with("distribution", int(record, "distribution"))
        .with("sfxName", text(record, "sfxName"))
        .with(
            "npcUsageChanceAttributeID",
            int(record, "npcUsageChanceAttributeID"),
        )
        .with(
            "npcActivationChanceAttributeID",
            int(record, "npcActivationChanceAttributeID"),
        )
        .with(
            "fittingUsageChanceAttributeID",
            int(record, "fittingUsageChanceAttributeID"),
        )
        .with("modifierInfo", modifier_info)
}

/// `{"_key": typeID, "dogmaAttributes": [{attributeID, value}, ...]}` —
/// one row per attribute, value split across the integer/float column pair.
fn map_type_dogma(record: &Record) -> Vec<Row> {
    explode(record, "dogmaAttributes", |parent, attribute| {
        let (value_int, value_float) = split_attribute_value(attribute.get("value"));
        Row::new()
            .with("typeID", parent.clone())
            .with("attributeID", int(attribute, "attributeID"))
            .with("valueInt", value_int)
            .with("valueFloat", value_float)
    })
}

/// Second pass over `typeDogma.jsonl`: the `dogmaEffects` array.
fn map_type_dogma_effects(record: &Record) -> Vec<Row> {
    explode(record, "dogmaEffects", |parent, effect| {
        Row::new()
            .with("typeID", parent.clone())
            .with("effectID", int(effect, "effectID"))
            .with("isDefault", boolean_or(effect, "isDefault", false))
    })
}

// ---------------------------------------------------------------------------
// Industry and planetary interaction
// ---------------------------------------------------------------------------

fn map_corporation_activities(record: &Record) -> Row {
    Row::new()
        .with("activityID", key(record))
        .with("activityName", localized(record, "name"))
        .with("iconNo", text(record, "iconNo"))
        .with("description", localized(record, "description"))
        .with("published", boolean_or(record, "published", false))
}

fn map_planet_schematics(record: &Record) -> Row {
    // The output type is the single entry with isInput = false.
    let output_type = record
        .get("types")
        .and_then(Value::as_array)
        .and_then(|types| {
            types.iter().find(|t| {
                t.get("isInput").and_then(Value::as_bool) == Some(false)
            })
        })
        .and_then(|t| t.get("_key"))
        .and_then(Value::as_i64)
        .map(SqlValue::Integer)
        .unwrap_or(SqlValue::Null);

    Row::new()
        .with("schematic_id", key(record))
        .with("cycle_time", int(record, "cycleTime"))
        .with("schematic_name", localized(record, "name"))
        .with("type_id", output_type)
}

// ---------------------------------------------------------------------------

/// Emit one row per object element of `record[field]`, passing the parent
/// record key to the builder. Missing or empty arrays yield no rows.
fn explode<F>(record: &Record, field: &str, build: F) -> Vec<Row>
where
    F: Fn(&SqlValue, &Record) -> Row,
{
    let parent = key(record);
    record
        .get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|item| build(&parent, item))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_type_materials_explosion() {
        let r = record(json!({
            "_key": 34,
            "materials": [
                {"materialTypeID": 35, "quantity": 10},
                {"materialTypeID": 36, "quantity": 5}
            ]
        }));

        let rows = map_record(SourceFile::TypeMaterials, &r);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].get("typeID"), Some(&SqlValue::Integer(34)));
        assert_eq!(rows[0].get("materialTypeID"), Some(&SqlValue::Integer(35)));
        assert_eq!(rows[0].get("quantity"), Some(&SqlValue::Integer(10)));
        assert_eq!(rows[1].get("typeID"), Some(&SqlValue::Integer(34)));
        assert_eq!(rows[1].get("materialTypeID"), Some(&SqlValue::Integer(36)));
        assert_eq!(rows[1].get("quantity"), Some(&SqlValue::Integer(5)));
    }

    #[test]
    fn test_empty_materials_yield_no_rows() {
        let r = record(json!({"_key": 34, "materials": []}));
        assert!(map_record(SourceFile::TypeMaterials, &r).is_empty());

        let r = record(json!({"_key": 34}));
        assert!(map_record(SourceFile::TypeMaterials, &r).is_empty());
    }

    #[test]
    fn test_type_dogma_value_split() {
        let r = record(json!({
            "_key": 587,
            "dogmaAttributes": [
                {"attributeID": 1, "value": 2147483647},
                {"attributeID": 2, "value": 2147483648i64},
                {"attributeID": 3, "value": 1.5}
            ]
        }));

        let rows = map_record(SourceFile::TypeDogma, &r);
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].get("valueInt"), Some(&SqlValue::Integer(2147483647)));
        assert_eq!(rows[0].get("valueFloat"), Some(&SqlValue::Null));

        assert_eq!(rows[1].get("valueInt"), Some(&SqlValue::Null));
        assert_eq!(
            rows[1].get("valueFloat"),
            Some(&SqlValue::Real(2147483648.0))
        );

        assert_eq!(rows[2].get("valueInt"), Some(&SqlValue::Null));
        assert_eq!(rows[2].get("valueFloat"), Some(&SqlValue::Real(1.5)));
    }

    #[test]
    fn test_type_dogma_effects_second_pass() {
        let r = record(json!({
            "_key": 587,
            "dogmaAttributes": [{"attributeID": 1, "value": 5}],
            "dogmaEffects": [
                {"effectID": 11, "isDefault": true},
                {"effectID": 12}
            ]
        }));

        let rows = map_record(SourceFile::TypeDogmaEffects, &r);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("effectID"), Some(&SqlValue::Integer(11)));
        assert_eq!(rows[0].get("isDefault"), Some(&SqlValue::Boolean(true)));
        assert_eq!(rows[1].get("isDefault"), Some(&SqlValue::Boolean(false)));
    }

    #[test]
    fn test_type_reactions_inputs_and_outputs() {
        let r = record(json!({
            "_key": 100,
            "inputs": [{"_key": 1, "quantity": 10}],
            "outputs": [{"_key": 2, "quantity": 1}, {"_key": 3, "quantity": 2}]
        }));

        let rows = map_record(SourceFile::TypeReactions, &r);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("input"), Some(&SqlValue::Boolean(true)));
        assert_eq!(rows[0].get("typeID"), Some(&SqlValue::Integer(1)));
        assert_eq!(rows[1].get("input"), Some(&SqlValue::Boolean(false)));
        assert_eq!(rows[2].get("reactionTypeID"), Some(&SqlValue::Integer(100)));
    }

    #[test]
    fn test_contraband_factions_explosion() {
        let r = record(json!({
            "_key": 9,
            "factions": [
                {"_key": 500001, "standingLoss": 2.0, "confiscateMinSec": 0.5,
                 "fineByValue": 1.5, "attackMinSec": 0.45}
            ]
        }));

        let rows = map_record(SourceFile::ContrabandTypes, &r);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("typeID"), Some(&SqlValue::Integer(9)));
        assert_eq!(rows[0].get("factionID"), Some(&SqlValue::Integer(500001)));
        assert_eq!(rows[0].get("standingLoss"), Some(&SqlValue::Real(2.0)));
    }

    #[test]
    fn test_types_defaults() {
        let r = record(json!({
            "_key": 34,
            "name": {"en": "Tritanium"},
            "groupID": 18,
            "published": true
        }));

        let rows = map_record(SourceFile::Types, &r);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];

        assert_eq!(row.get("typeID"), Some(&SqlValue::Integer(34)));
        assert_eq!(
            row.get("typeName"),
            Some(&SqlValue::Text("Tritanium".to_string()))
        );
        assert_eq!(row.get("portionSize"), Some(&SqlValue::Integer(1)));
        assert_eq!(row.get("mass"), Some(&SqlValue::Null));
        assert_eq!(row.get("published"), Some(&SqlValue::Boolean(true)));
    }

    #[test]
    fn test_types_meta_requires_meta_group() {
        let r = record(json!({"_key": 34, "metaGroupID": 1}));
        let rows = map_record(SourceFile::TypesMeta, &r);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("metaGroupID"), Some(&SqlValue::Integer(1)));
        assert_eq!(rows[0].get("parentTypeID"), Some(&SqlValue::Integer(34)));

        let r = record(json!({"_key": 34}));
        assert!(map_record(SourceFile::TypesMeta, &r).is_empty());
    }

    #[test]
    fn test_map_region_row() {
        let r = record(json!({
            "_key": 10000002,
            "name": {"en": "The Forge"},
            "position": {"x": 1.0, "y": 2.0, "z": 3.0}
        }));

        let rows = map_record(SourceFile::MapRegions, &r);
        let row = &rows[0];

        assert_eq!(row.get("itemID"), Some(&SqlValue::Integer(10000002)));
        assert_eq!(row.get("groupID"), Some(&SqlValue::Integer(3)));
        assert_eq!(row.get("regionID"), Some(&SqlValue::Integer(10000002)));
        assert_eq!(
            row.get("itemName"),
            Some(&SqlValue::Text("The Forge".to_string()))
        );
        assert_eq!(row.get("x"), Some(&SqlValue::Real(1.0)));
        assert_eq!(row.get("solarSystemID"), Some(&SqlValue::Null));
    }

    #[test]
    fn test_map_position_defaults_to_origin() {
        let r = record(json!({"_key": 10000002, "name": {"en": "The Forge"}}));
        let rows = map_record(SourceFile::MapRegions, &r);
        assert_eq!(rows[0].get("x"), Some(&SqlValue::Real(0.0)));
        assert_eq!(rows[0].get("y"), Some(&SqlValue::Real(0.0)));
        assert_eq!(rows[0].get("z"), Some(&SqlValue::Real(0.0)));
    }

    #[test]
    fn test_map_solar_system_uses_star_type() {
        let r = record(json!({
            "_key": 30000142,
            "name": {"en": "Jita"},
            "regionID": 10000002,
            "constellationID": 20000020,
            "security": 0.9459,
            "star": {"typeID": 45041}
        }));

        let rows = map_record(SourceFile::MapSolarSystems, &r);
        let row = &rows[0];

        assert_eq!(row.get("groupID"), Some(&SqlValue::Integer(5)));
        assert_eq!(row.get("typeID"), Some(&SqlValue::Integer(45041)));
        assert_eq!(row.get("solarSystemID"), Some(&SqlValue::Integer(30000142)));
        assert_eq!(row.get("constellationID"), Some(&SqlValue::Integer(20000020)));
        assert_eq!(row.get("security"), Some(&SqlValue::Real(0.9459)));
    }

    #[test]
    fn test_map_star_carries_radius_not_position() {
        let r = record(json!({
            "_key": 40000001,
            "typeID": 3800,
            "solarSystemID": 30000001,
            "radius": 346000000.0
        }));

        let rows = map_record(SourceFile::MapStars, &r);
        let row = &rows[0];

        assert_eq!(row.get("groupID"), Some(&SqlValue::Integer(6)));
        assert_eq!(row.get("radius"), Some(&SqlValue::Real(346000000.0)));
        // Stars carry no coordinates; nulls must not clobber merge peers.
        assert_eq!(row.get("x"), Some(&SqlValue::Null));
    }

    #[test]
    fn test_planet_schematics_output_type() {
        let r = record(json!({
            "_key": 65,
            "cycleTime": 1800,
            "name": {"en": "Superconductors"},
            "types": [
                {"_key": 2308, "isInput": true},
                {"_key": 2309, "isInput": true},
                {"_key": 9838, "isInput": false}
            ]
        }));

        let rows = map_record(SourceFile::PlanetSchematics, &r);
        let row = &rows[0];

        assert_eq!(row.get("schematic_id"), Some(&SqlValue::Integer(65)));
        assert_eq!(row.get("cycle_time"), Some(&SqlValue::Integer(1800)));
        assert_eq!(row.get("type_id"), Some(&SqlValue::Integer(9838)));
    }

    #[test]
    fn test_default_mapping_passthrough() {
        let r = record(json!({
            "_key": 7,
            "name": {"en": "Something", "de": "Etwas"},
            "count": 3,
            "flag": true
        }));

        let row = map_default(&r);
        assert_eq!(row.get("id"), Some(&SqlValue::Integer(7)));
        assert_eq!(
            row.get("name"),
            Some(&SqlValue::Text("Something".to_string()))
        );
        assert_eq!(row.get("count"), Some(&SqlValue::Integer(3)));
        assert_eq!(row.get("flag"), Some(&SqlValue::Boolean(true)));
    }

    #[test]
    fn test_rows_cover_full_denormalize_column_set() {
        let region = record(json!({"_key": 1, "name": {"en": "A"}}));
        let star = record(json!({"_key": 2, "typeID": 6, "solarSystemID": 3}));

        let region_row = &map_record(SourceFile::MapRegions, &region)[0];
        let star_row = &map_record(SourceFile::MapStars, &star)[0];

        let region_cols: Vec<_> = region_row.columns().map(|(n, _)| n.clone()).collect();
        let star_cols: Vec<_> = star_row.columns().map(|(n, _)| n.clone()).collect();
        assert_eq!(region_cols, star_cols);
    }
}

//! Destination table definitions for the SeAT-compatible schema.

use super::types::ColumnType::{Boolean, Integer, Real, Text};
use super::types::*;

// =============================================================================
// Inventory
// =============================================================================

pub static INV_CATEGORIES: TableDef = TableDef {
    name: "invCategories",
    columns: &[
        ColumnDef::new("categoryID", Integer),
        ColumnDef::new("categoryName", Text),
        ColumnDef::new("iconID", Integer),
        ColumnDef::new("published", Boolean),
    ],
    key: Some("categoryID"),
    indexes: &[],
};

pub static INV_GROUPS: TableDef = TableDef {
    name: "invGroups",
    columns: &[
        ColumnDef::new("groupID", Integer),
        ColumnDef::new("categoryID", Integer),
        ColumnDef::new("groupName", Text),
        ColumnDef::new("iconID", Integer),
        ColumnDef::new("useBasePrice", Boolean),
        ColumnDef::new("anchored", Boolean),
        ColumnDef::new("anchorable", Boolean),
        ColumnDef::new("fittableNonSingleton", Boolean),
        ColumnDef::new("published", Boolean),
    ],
    key: Some("groupID"),
    indexes: &["categoryID"],
};

pub static INV_META_GROUPS: TableDef = TableDef {
    name: "invMetaGroups",
    columns: &[
        ColumnDef::new("metaGroupID", Integer),
        ColumnDef::new("metaGroupName", Text),
        ColumnDef::new("description", Text),
        ColumnDef::new("iconID", Integer),
    ],
    key: Some("metaGroupID"),
    indexes: &[],
};

pub static INV_META_TYPES: TableDef = TableDef {
    name: "invMetaTypes",
    columns: &[
        ColumnDef::new("typeID", Integer),
        ColumnDef::new("parentTypeID", Integer),
        ColumnDef::new("metaGroupID", Integer),
    ],
    key: Some("typeID"),
    indexes: &["metaGroupID"],
};

pub static INV_TYPES: TableDef = TableDef {
    name: "invTypes",
    columns: &[
        ColumnDef::new("typeID", Integer),
        ColumnDef::new("groupID", Integer),
        ColumnDef::new("typeName", Text),
        ColumnDef::new("description", Text),
        ColumnDef::new("mass", Real),
        ColumnDef::new("volume", Real),
        ColumnDef::new("capacity", Real),
        ColumnDef::new("portionSize", Integer),
        ColumnDef::new("raceID", Integer),
        ColumnDef::new("basePrice", Real),
        ColumnDef::new("published", Boolean),
        ColumnDef::new("marketGroupID", Integer),
        ColumnDef::new("iconID", Integer),
        ColumnDef::new("soundID", Integer),
        ColumnDef::new("graphicID", Integer),
    ],
    key: Some("typeID"),
    indexes: &["groupID", "marketGroupID"],
};

pub static INV_MARKET_GROUPS: TableDef = TableDef {
    name: "invMarketGroups",
    columns: &[
        ColumnDef::new("marketGroupID", Integer),
        ColumnDef::new("parentGroupID", Integer),
        ColumnDef::new("marketGroupName", Text),
        ColumnDef::new("description", Text),
        ColumnDef::new("iconID", Integer),
        ColumnDef::new("hasTypes", Boolean),
    ],
    key: Some("marketGroupID"),
    indexes: &[],
};

pub static INV_TYPE_MATERIALS: TableDef = TableDef {
    name: "invTypeMaterials",
    columns: &[
        ColumnDef::new("typeID", Integer),
        ColumnDef::new("materialTypeID", Integer),
        ColumnDef::new("quantity", Integer),
    ],
    key: None,
    indexes: &["typeID"],
};

pub static INV_TYPE_REACTIONS: TableDef = TableDef {
    name: "invTypeReactions",
    columns: &[
        ColumnDef::new("reactionTypeID", Integer),
        ColumnDef::new("input", Boolean),
        ColumnDef::new("typeID", Integer),
        ColumnDef::new("quantity", Integer),
    ],
    key: None,
    indexes: &["reactionTypeID"],
};

pub static INV_FLAGS: TableDef = TableDef {
    name: "invFlags",
    columns: &[
        ColumnDef::new("flagID", Integer),
        ColumnDef::new("flagName", Text),
        ColumnDef::new("flagText", Text),
        ColumnDef::new("orderID", Integer),
    ],
    key: Some("flagID"),
    indexes: &[],
};

pub static INV_CONTRABAND_TYPES: TableDef = TableDef {
    name: "invContrabandTypes",
    columns: &[
        ColumnDef::new("typeID", Integer),
        ColumnDef::new("factionID", Integer),
        ColumnDef::new("standingLoss", Real),
        ColumnDef::new("confiscateMinSec", Real),
        ColumnDef::new("fineByValue", Real),
        ColumnDef::new("attackMinSec", Real),
    ],
    key: None,
    indexes: &["typeID"],
};

pub static INV_CONTROL_TOWER_RESOURCES: TableDef = TableDef {
    name: "invControlTowerResources",
    columns: &[
        ColumnDef::new("controlTowerTypeID", Integer),
        ColumnDef::new("resourceTypeID", Integer),
        ColumnDef::new("purpose", Integer),
        ColumnDef::new("quantity", Integer),
        ColumnDef::new("minSecurityLevel", Real),
        ColumnDef::new("factionID", Integer),
    ],
    key: None,
    indexes: &["controlTowerTypeID"],
};

pub static INV_CONTROL_TOWER_RESOURCE_PURPOSES: TableDef = TableDef {
    name: "invControlTowerResourcePurposes",
    columns: &[
        ColumnDef::new("purpose", Integer),
        ColumnDef::new("purposeText", Text),
    ],
    key: Some("purpose"),
    indexes: &[],
};

// =============================================================================
// Universe map
// =============================================================================

pub static MAP_DENORMALIZE: TableDef = TableDef {
    name: "mapDenormalize",
    columns: &[
        ColumnDef::new("itemID", Integer),
        ColumnDef::new("typeID", Integer),
        ColumnDef::new("groupID", Integer),
        ColumnDef::new("regionID", Integer),
        ColumnDef::new("constellationID", Integer),
        ColumnDef::new("solarSystemID", Integer),
        ColumnDef::new("itemName", Text),
        ColumnDef::new("x", Real),
        ColumnDef::new("y", Real),
        ColumnDef::new("z", Real),
        ColumnDef::new("security", Real),
        ColumnDef::new("radius", Real),
    ],
    key: Some("itemID"),
    indexes: &["regionID", "solarSystemID"],
};

// =============================================================================
// Factions and stations
// =============================================================================

pub static CHR_FACTIONS: TableDef = TableDef {
    name: "chrFactions",
    columns: &[
        ColumnDef::new("factionID", Integer),
        ColumnDef::new("factionName", Text),
        ColumnDef::new("description", Text),
        ColumnDef::new("solarSystemID", Integer),
        ColumnDef::new("corporationID", Integer),
        ColumnDef::new("sizeFactor", Real),
        ColumnDef::new("stationCount", Integer),
        ColumnDef::new("stationSystemCount", Integer),
        ColumnDef::new("militiaCorporationID", Integer),
        ColumnDef::new("iconID", Integer),
    ],
    key: Some("factionID"),
    indexes: &[],
};

pub static STA_STATIONS: TableDef = TableDef {
    name: "staStations",
    columns: &[
        ColumnDef::new("stationID", Integer),
        ColumnDef::new("security", Real),
        ColumnDef::new("dockingCostPerVolume", Real),
        ColumnDef::new("maxShipVolumeDockable", Real),
        ColumnDef::new("officeRentalCost", Real),
        ColumnDef::new("operationID", Integer),
        ColumnDef::new("stationTypeID", Integer),
        ColumnDef::new("corporationID", Integer),
        ColumnDef::new("solarSystemID", Integer),
        ColumnDef::new("constellationID", Integer),
        ColumnDef::new("regionID", Integer),
        ColumnDef::new("stationName", Text),
        ColumnDef::new("x", Real),
        ColumnDef::new("y", Real),
        ColumnDef::new("z", Real),
        ColumnDef::new("reprocessingEfficiency", Real),
        ColumnDef::new("reprocessingStationsTake", Real),
        ColumnDef::new("reprocessingHangarFlag", Integer),
    ],
    key: Some("stationID"),
    indexes: &["solarSystemID", "corporationID"],
};

// =============================================================================
// Dogma
// =============================================================================

pub static DGM_ATTRIBUTE_TYPES: TableDef = TableDef {
    name: "dgmAttributeTypes",
    columns: &[
        ColumnDef::new("attributeID", Integer),
        ColumnDef::new("attributeName", Text),
        ColumnDef::new("description", Text),
        ColumnDef::new("iconID", Integer),
        ColumnDef::new("defaultValue", Real),
        ColumnDef::new("published", Boolean),
        ColumnDef::new("displayName", Text),
        ColumnDef::new("unitID", Integer),
        ColumnDef::new("stackable", Boolean),
        ColumnDef::new("highIsGood", Boolean),
        ColumnDef::new("categoryID", Integer),
    ],
    key: Some("attributeID"),
    indexes: &[],
};

pub static DGM_EFFECTS: TableDef = TableDef {
    name: "dgmEffects",
    columns: &[
        ColumnDef::new("effectID", Integer),
        ColumnDef::new("effectName", Text),
        ColumnDef::new("effectCategory", Integer),
        ColumnDef::new("preExpression", Integer),
        ColumnDef::new("postExpression", Integer),
        ColumnDef::new("description", Text),
        ColumnDef::new("guid", Text),
        ColumnDef::new("iconID", Integer),
        ColumnDef::new("isOffensive", Boolean),
        ColumnDef::new("isAssistance", Boolean),
        ColumnDef::new("durationAttributeID", Integer),
        ColumnDef::new("trackingSpeedAttributeID", Integer),
        ColumnDef::new("dischargeAttributeID", Integer),
        ColumnDef::new("rangeAttributeID", Integer),
        ColumnDef::new("falloffAttributeID", Integer),
        ColumnDef::new("disallowAutoRepeat", Boolean),
        ColumnDef::new("published", Boolean),
        ColumnDef::new("displayName", Text),
        ColumnDef::new("isWarpSafe", Boolean),
        ColumnDef::new("rangeChance", Boolean),
        ColumnDef::new("electronicChance", Boolean),
        ColumnDef::new("propulsionChance", Boolean),
        ColumnDef::new("distribution", Integer),
        ColumnDef::new("sfxName", Text),
        ColumnDef::new("npcUsageChanceAttributeID", Integer),
        ColumnDef::new("npcActivationChanceAttributeID", Integer),
        ColumnDef::new("fittingUsageChanceAttributeID", Integer),
        ColumnDef::new("modifierInfo", Text),
    ],
    key: Some("effectID"),
    indexes: &[],
};

pub static DGM_TYPE_ATTRIBUTES: TableDef = TableDef {
    name: "dgmTypeAttributes",
    columns: &[
        ColumnDef::new("typeID", Integer),
        ColumnDef::new("attributeID", Integer),
        ColumnDef::new("valueInt", Integer),
        ColumnDef::new("valueFloat", Real),
    ],
    key: None,
    indexes: &["typeID", "attributeID"],
};

pub static DGM_TYPE_EFFECTS: TableDef = TableDef {
    name: "dgmTypeEffects",
    columns: &[
        ColumnDef::new("typeID", Integer),
        ColumnDef::new("effectID", Integer),
        ColumnDef::new("isDefault", Boolean),
    ],
    key: None,
    indexes: &["typeID"],
};

// =============================================================================
// Industry and planetary interaction
// =============================================================================

pub static RAM_ACTIVITIES: TableDef = TableDef {
    name: "ramActivities",
    columns: &[
        ColumnDef::new("activityID", Integer),
        ColumnDef::new("activityName", Text),
        ColumnDef::new("iconNo", Text),
        ColumnDef::new("description", Text),
        ColumnDef::new("published", Boolean),
    ],
    key: Some("activityID"),
    indexes: &[],
};

pub static UNIVERSE_SCHEMATICS: TableDef = TableDef {
    name: "universe_schematics",
    columns: &[
        ColumnDef::new("schematic_id", Integer),
        ColumnDef::new("cycle_time", Integer),
        ColumnDef::new("schematic_name", Text),
        ColumnDef::new("type_id", Integer),
    ],
    key: Some("schematic_id"),
    indexes: &[],
};

// =============================================================================
// Registry
// =============================================================================

/// All destination tables.
pub static DEST_TABLES: &[&TableDef] = &[
    &INV_CATEGORIES,
    &INV_GROUPS,
    &INV_META_GROUPS,
    &INV_META_TYPES,
    &INV_TYPES,
    &INV_MARKET_GROUPS,
    &INV_TYPE_MATERIALS,
    &INV_TYPE_REACTIONS,
    &INV_FLAGS,
    &INV_CONTRABAND_TYPES,
    &INV_CONTROL_TOWER_RESOURCES,
    &INV_CONTROL_TOWER_RESOURCE_PURPOSES,
    &MAP_DENORMALIZE,
    &CHR_FACTIONS,
    &STA_STATIONS,
    &DGM_ATTRIBUTE_TYPES,
    &DGM_EFFECTS,
    &DGM_TYPE_ATTRIBUTES,
    &DGM_TYPE_EFFECTS,
    &RAM_ACTIVITIES,
    &UNIVERSE_SCHEMATICS,
];

/// Get a table definition by name.
pub fn get_table(name: &str) -> Option<&'static TableDef> {
    DEST_TABLES.iter().find(|t| t.name == name).copied()
}

/// All destination table names.
pub fn table_names() -> Vec<&'static str> {
    DEST_TABLES.iter().map(|t| t.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::SourceFile;

    #[test]
    fn test_every_source_file_targets_a_known_table() {
        for file in SourceFile::ALL {
            assert!(
                get_table(file.table()).is_some(),
                "missing table definition for {}",
                file.table()
            );
        }
    }

    #[test]
    fn test_merge_tables_have_a_key() {
        for file in SourceFile::ALL {
            if let crate::mapping::LoadMode::Merge { key } = file.load_mode() {
                let table = get_table(file.table()).unwrap();
                assert_eq!(table.key, Some(key));
            }
        }
    }
}

//! The static registry of supported source files.
//!
//! Every known JSONL member is one variant; dispatch is by enumeration, not
//! by string pattern matching. Two virtual members (`types:meta.jsonl` and
//! `typeDogma:effects.jsonl`) route a second pass over a physical member to a
//! different destination table.

/// How rows are loaded into a destination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Truncate once per run before the first batch, then append.
    Replace,
    /// Truncate once per run before the first contributing file, then
    /// update-or-insert keyed by the given column on every batch.
    Merge { key: &'static str },
}

/// One supported source file, in the fixed import vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFile {
    Categories,
    Groups,
    MetaGroups,
    TypesMeta,
    Types,
    MarketGroups,
    TypeMaterials,
    TypeReactions,
    Flags,
    MapRegions,
    MapConstellations,
    MapSolarSystems,
    MapStars,
    MapPlanets,
    MapMoons,
    Factions,
    ContrabandTypes,
    NpcStations,
    ControlTowerResources,
    ControlTowerResourcePurposes,
    DogmaAttributes,
    DogmaEffects,
    TypeDogma,
    TypeDogmaEffects,
    CorporationActivities,
    PlanetSchematics,
}

impl SourceFile {
    /// All supported files in import order. Foreign-key parents come before
    /// their dependents: categories before groups before types, and the map
    /// hierarchy region → constellation → system → star/planet/moon. The
    /// merge-table truncate point follows this order (first contributing
    /// file), so reordering here moves it too.
    pub const ALL: &'static [SourceFile] = &[
        SourceFile::Categories,
        SourceFile::Groups,
        SourceFile::MetaGroups,
        SourceFile::TypesMeta,
        SourceFile::Types,
        SourceFile::MarketGroups,
        SourceFile::TypeMaterials,
        SourceFile::TypeReactions,
        SourceFile::Flags,
        SourceFile::MapRegions,
        SourceFile::MapConstellations,
        SourceFile::MapSolarSystems,
        SourceFile::MapStars,
        SourceFile::MapPlanets,
        SourceFile::MapMoons,
        SourceFile::Factions,
        SourceFile::ContrabandTypes,
        SourceFile::NpcStations,
        SourceFile::ControlTowerResources,
        SourceFile::ControlTowerResourcePurposes,
        SourceFile::DogmaAttributes,
        SourceFile::DogmaEffects,
        SourceFile::TypeDogma,
        SourceFile::TypeDogmaEffects,
        SourceFile::CorporationActivities,
        SourceFile::PlanetSchematics,
    ];

    /// The member identifier used for routing and reporting. Virtual members
    /// use the `base:suffix.jsonl` form.
    pub fn member_name(self) -> &'static str {
        match self {
            SourceFile::Categories => "categories.jsonl",
            SourceFile::Groups => "groups.jsonl",
            SourceFile::MetaGroups => "metaGroups.jsonl",
            SourceFile::TypesMeta => "types:meta.jsonl",
            SourceFile::Types => "types.jsonl",
            SourceFile::MarketGroups => "marketGroups.jsonl",
            SourceFile::TypeMaterials => "typeMaterials.jsonl",
            SourceFile::TypeReactions => "typeReactions.jsonl",
            SourceFile::Flags => "flags.jsonl",
            SourceFile::MapRegions => "mapRegions.jsonl",
            SourceFile::MapConstellations => "mapConstellations.jsonl",
            SourceFile::MapSolarSystems => "mapSolarSystems.jsonl",
            SourceFile::MapStars => "mapStars.jsonl",
            SourceFile::MapPlanets => "mapPlanets.jsonl",
            SourceFile::MapMoons => "mapMoons.jsonl",
            SourceFile::Factions => "factions.jsonl",
            SourceFile::ContrabandTypes => "contrabandTypes.jsonl",
            SourceFile::NpcStations => "npcStations.jsonl",
            SourceFile::ControlTowerResources => "controlTowerResources.jsonl",
            SourceFile::ControlTowerResourcePurposes => "controlTowerResourcePurposes.jsonl",
            SourceFile::DogmaAttributes => "dogmaAttributes.jsonl",
            SourceFile::DogmaEffects => "dogmaEffects.jsonl",
            SourceFile::TypeDogma => "typeDogma.jsonl",
            SourceFile::TypeDogmaEffects => "typeDogma:effects.jsonl",
            SourceFile::CorporationActivities => "corporationActivities.jsonl",
            SourceFile::PlanetSchematics => "planetSchematics.jsonl",
        }
    }

    /// The archive member actually read. Virtual members read their base
    /// member's bytes.
    pub fn physical_member(self) -> &'static str {
        match self {
            SourceFile::TypesMeta => "types.jsonl",
            SourceFile::TypeDogmaEffects => "typeDogma.jsonl",
            other => other.member_name(),
        }
    }

    /// Destination table name.
    pub fn table(self) -> &'static str {
        match self {
            SourceFile::Categories => "invCategories",
            SourceFile::Groups => "invGroups",
            SourceFile::MetaGroups => "invMetaGroups",
            SourceFile::TypesMeta => "invMetaTypes",
            SourceFile::Types => "invTypes",
            SourceFile::MarketGroups => "invMarketGroups",
            SourceFile::TypeMaterials => "invTypeMaterials",
            SourceFile::TypeReactions => "invTypeReactions",
            SourceFile::Flags => "invFlags",
            SourceFile::MapRegions
            | SourceFile::MapConstellations
            | SourceFile::MapSolarSystems
            | SourceFile::MapStars
            | SourceFile::MapPlanets
            | SourceFile::MapMoons => "mapDenormalize",
            SourceFile::Factions => "chrFactions",
            SourceFile::ContrabandTypes => "invContrabandTypes",
            SourceFile::NpcStations => "staStations",
            SourceFile::ControlTowerResources => "invControlTowerResources",
            SourceFile::ControlTowerResourcePurposes => "invControlTowerResourcePurposes",
            SourceFile::DogmaAttributes => "dgmAttributeTypes",
            SourceFile::DogmaEffects => "dgmEffects",
            SourceFile::TypeDogma => "dgmTypeAttributes",
            SourceFile::TypeDogmaEffects => "dgmTypeEffects",
            SourceFile::CorporationActivities => "ramActivities",
            SourceFile::PlanetSchematics => "universe_schematics",
        }
    }

    pub fn load_mode(self) -> LoadMode {
        match self {
            SourceFile::MapRegions
            | SourceFile::MapConstellations
            | SourceFile::MapSolarSystems
            | SourceFile::MapStars
            | SourceFile::MapPlanets
            | SourceFile::MapMoons => LoadMode::Merge { key: "itemID" },
            _ => LoadMode::Replace,
        }
    }

    /// Whether any supported file reads the given physical archive member.
    pub fn claims_member(member: &str) -> bool {
        SourceFile::ALL
            .iter()
            .any(|file| file.physical_member() == member)
    }
}

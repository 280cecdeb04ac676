//! The fixed bucket taxonomy.
//!
//! Buckets are derived in table order, so a bucket may only refer to buckets
//! listed above it. Adding a category is a new row here; [`crate::buckets`]
//! never needs to change.

/// Test applied to a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Course code equals the sentinel.
    CodeIs(&'static str),
    /// Course code is absent or differs from the sentinel.
    CodeIsNot(&'static str),
    /// `CUSTOM` code, or a code-less legacy course named `Custom`.
    Custom,
    /// Case-sensitive substring of the notes.
    NotesContain(&'static str),
    /// Case-insensitive regex over the raw notes.
    NotesMatch(&'static str),
    /// Case-insensitive regex over the notes with newlines turned into spaces.
    NotesMatchJoined(&'static str),
}

/// Where a flat bucket draws its candidates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Population {
    All,
    Bucket(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub enum BucketRule {
    Flat {
        population: Population,
        predicate: Predicate,
    },
    /// One sub-bucket per `(label, predicate)`, each drawn from `population`.
    Keyed {
        population: Population,
        sections: &'static [(&'static str, Predicate)],
    },
    /// Members of `base` that are in none of `excluding`.
    Residual {
        base: &'static str,
        excluding: &'static [&'static str],
    },
}

#[derive(Debug, Clone, Copy)]
pub struct BucketDef {
    pub name: &'static str,
    pub rule: BucketRule,
}

pub const PRIMARY_COURSE: &str = "JOL3";
pub const SECONDARY_COURSE: &str = "NECTAR_PATH";
pub const CUSTOM_CODE: &str = "CUSTOM";
pub const CUSTOM_NAME: &str = "Custom";

/// Every bucket standing for a real course or program. `not-any-course`
/// excludes all of them.
pub const NAMED_COURSES: &[&str] = &[
    "ded",
    "adl",
    "doa",
    "nop",
    "fully-being-v1",
    "fully-being-v2",
];

const WEEKS: &[(&str, Predicate)] = &[
    ("W1", Predicate::NotesContain("W1")),
    ("W2", Predicate::NotesContain("W2")),
    ("W3", Predicate::NotesContain("W3")),
    ("W4", Predicate::NotesContain("W4")),
    ("W5", Predicate::NotesContain("W5")),
    ("W6", Predicate::NotesContain("W6")),
];

const FULLY_BEING_V1_SECTIONS: &[(&str, Predicate)] = &[
    ("Dropping", Predicate::NotesMatchJoined("dropping")),
    ("Four Modes", Predicate::NotesMatchJoined("four modes")),
    ("Handshake", Predicate::NotesMatchJoined("handshake")),
    ("Essence Love", Predicate::NotesMatchJoined("essence love")),
    ("Subtle Body", Predicate::NotesMatchJoined("subtle body")),
    ("Calm Abiding", Predicate::NotesMatchJoined("calm abiding")),
    ("Insight", Predicate::NotesMatchJoined("insight")),
    ("Qualities", Predicate::NotesMatchJoined("qualities")),
];

const FULLY_BEING_V2_SECTIONS: &[(&str, Predicate)] = &[
    ("Dropping", Predicate::NotesMatchJoined("dropping")),
    ("Handshake", Predicate::NotesMatchJoined("handshake")),
    ("Essence Love", Predicate::NotesMatchJoined("essence love")),
    ("Four Ways", Predicate::NotesMatchJoined("four ways")),
    ("Subtle Body", Predicate::NotesMatchJoined("subtle body")),
    ("Shinay", Predicate::NotesMatchJoined("shinay")),
    ("Insight", Predicate::NotesMatchJoined("insight")),
    ("Qualities", Predicate::NotesMatchJoined("qualities")),
];

const PATH_OF_LIBERATION_SECTIONS: &[(&str, Predicate)] = &[
    ("Four Thoughts 1", Predicate::NotesMatchJoined(r"four[- ]+thoughts[- ]+1")),
    ("Four Thoughts 2", Predicate::NotesMatchJoined(r"four[- ]+thoughts[- ]+2")),
    ("Four Thoughts 3", Predicate::NotesMatchJoined(r"four[- ]+thoughts[- ]+3")),
    ("Four Thoughts 4", Predicate::NotesMatchJoined(r"four[- ]+thoughts[- ]+4")),
    ("SMA", Predicate::NotesMatchJoined("sma")),
    ("APCFM", Predicate::NotesMatchJoined("apcfm")),
];

const fn flat(name: &'static str, predicate: Predicate) -> BucketDef {
    BucketDef {
        name,
        rule: BucketRule::Flat {
            population: Population::All,
            predicate,
        },
    }
}

const fn keyed(
    name: &'static str,
    population: &'static str,
    sections: &'static [(&'static str, Predicate)],
) -> BucketDef {
    BucketDef {
        name,
        rule: BucketRule::Keyed {
            population: Population::Bucket(population),
            sections,
        },
    }
}

pub const TAXONOMY: &[BucketDef] = &[
    // jol3 and not-jol3 partition the whole log
    flat("jol3", Predicate::CodeIs(PRIMARY_COURSE)),
    flat("not-jol3", Predicate::CodeIsNot(PRIMARY_COURSE)),
    flat("custom", Predicate::Custom),
    keyed("jol3-by-week", "jol3", WEEKS),
    // Dying Every Day
    flat("ded", Predicate::NotesContain("DED")),
    // Awakening in Daily Life
    flat("adl", Predicate::NotesContain("ADL")),
    // Dying and Awakening
    flat("doa", Predicate::NotesContain("DOA")),
    // Nectar of the Path
    flat("nop", Predicate::CodeIs(SECONDARY_COURSE)),
    flat("fully-being-v1", Predicate::NotesMatch(r"TR[- ]+FB[,\- ]")),
    keyed("fb-sections", "fully-being-v1", FULLY_BEING_V1_SECTIONS),
    flat("fully-being-v2", Predicate::NotesMatch(r"TR[- ]+FB2[,\- ]")),
    keyed("fb2-sections", "fully-being-v2", FULLY_BEING_V2_SECTIONS),
    BucketDef {
        name: "not-any-course",
        rule: BucketRule::Residual {
            base: "custom",
            excluding: NAMED_COURSES,
        },
    },
    // Path of Liberation 1, practised inside Nectar of the Path
    keyed("pol1", "nop", PATH_OF_LIBERATION_SECTIONS),
];

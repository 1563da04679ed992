//! Built-in rule book for the seven-category ape collection
//!
//! Rules are grouped by step; within a step the order below is the
//! evaluation order and must not be rearranged.

use crate::catalog::category::Category;
use crate::compose::rules::Condition::{All, Any, Has, Lacks, Not};
use crate::compose::rules::{Condition, ConflictRule, Effect, RuleBook, Source};
use crate::features::flags::Feature;
use crate::io::configuration::GLASSES_BASE_EYES;
use crate::raster::canvas::Rect;
use crate::raster::patch::{CropRegion, Extent};

// Height of the helmet brim kept when glasses sit under an army helmet
const HELMET_BRIM_HEIGHT: u32 = 550;
// Width of the goggle band kept in front of glasses
const GOGGLE_BAND_WIDTH: u32 = 535;
// Height of the robot visor kept under a backwards bandana
const ROBOT_VISOR_HEIGHT: u32 = 450;

const TROOPER_OR_BACKWARDS_HAT: Condition =
    Any(&[Has(Feature::TrooperHat), Has(Feature::BackwardsHat)]);
const TROOPER_OR_HELMET: Condition = Any(&[Has(Feature::TrooperHat), Has(Feature::ArmyHelmet)]);
const FLAME_UNDER_HAT: Condition = All(&[Has(Feature::FlameShades), TROOPER_OR_HELMET]);
const GOGGLES_OVER_GLASSES: Condition = All(&[
    Has(Feature::Glasses),
    Has(Feature::Goggles),
    Lacks(Feature::PlasmaVision),
    Lacks(Feature::FlameShades),
]);
const PLASMA_UNDER_COVER: Condition =
    All(&[Has(Feature::CoveredHead), Has(Feature::PlasmaVision)]);
const SMALL_GLASSES_UNDER_BANDANA: Condition = All(&[
    Has(Feature::BackwardsBandana),
    Has(Feature::Glasses),
    Lacks(Feature::BigGlasses),
]);

const PUFFER_MOUTHS: [(Condition, &str); 8] = [
    (
        All(&[Has(Feature::ZippedPuffer), Has(Feature::Grin)]),
        "grin-puffer-mouth",
    ),
    (
        All(&[Has(Feature::ZippedPuffer), Has(Feature::SmallGrin)]),
        "small-grin-puffer-mouth",
    ),
    (
        All(&[Has(Feature::ZippedPuffer), Has(Feature::Rose)]),
        "rose-puffer-mouth",
    ),
    (
        All(&[Has(Feature::ZippedPuffer), Has(Feature::Discomfort)]),
        "discomfort-puffer-mouth",
    ),
    (
        All(&[Has(Feature::ZippedPuffer), Has(Feature::Bored)]),
        "bored-puffer-mouth",
    ),
    (
        All(&[Has(Feature::ZippedPuffer), Has(Feature::BoredUnshaven)]),
        "bored-unshaven-puffer-mouth",
    ),
    (
        All(&[Has(Feature::ZippedPuffer), Has(Feature::Phoneme)]),
        "phenome-puffer-mouth",
    ),
    (
        All(&[Has(Feature::ZippedPuffer), Has(Feature::Tongue)]),
        "tongue-puffer-mouth",
    ),
];

const GLASSES_BASE: Effect = Effect::Draw(Source::Variant(Category::Eyes, GLASSES_BASE_EYES));

impl RuleBook {
    /// Conflict rules of the ape collection in evaluation order
    pub fn collection() -> Self {
        let mut rules = vec![ConflictRule::extra(
            "helmet-strap-mask",
            Category::Clothes,
            Has(Feature::ArmyHelmet),
            [Effect::Fill {
                region: Rect::from_corners([280, 400], [350, 530]),
                sample: [500, 0],
            }],
        )];
        rules.extend(eyes_rules());
        rules.extend(head_rules());
        rules.extend(mouth_rules());
        rules.extend(jewelry_rules());
        Self::new(rules)
    }
}

// Glasses are held back and drawn on the Mouth step, above the mouth and
// below voluminous heads; the Eyes step then only draws plain eyes.
fn eyes_rules() -> Vec<ConflictRule> {
    vec![
        ConflictRule::extra(
            "trooper-hat-right-flap",
            Category::Eyes,
            Has(Feature::TrooperHat),
            [Effect::Draw(Source::Special("Trooper Hat Right"))],
        ),
        ConflictRule::resolve(
            "beanie-oversized-glasses",
            Category::Eyes,
            All(&[Has(Feature::Oversized), Has(Feature::Beanie)]),
            [
                Effect::Hold(Category::Eyes, Source::Special("beanie-oversized-eyes")),
                GLASSES_BASE,
            ],
        ),
        ConflictRule::resolve(
            "backwards-bandana-thick-frames",
            Category::Eyes,
            All(&[Has(Feature::ThickFrames), Has(Feature::BackwardsBandana)]),
            [
                Effect::Hold(
                    Category::Eyes,
                    Source::Special("backwards-bandana-thick-frame-glasses"),
                ),
                GLASSES_BASE,
            ],
        ),
        ConflictRule::resolve(
            "blonde-braids-oversized-glasses",
            Category::Eyes,
            All(&[Has(Feature::Oversized), Has(Feature::BlondeBraids)]),
            [
                Effect::Hold(
                    Category::Eyes,
                    Source::Special("blonde-braids-oversized-glasses"),
                ),
                GLASSES_BASE,
            ],
        ),
        ConflictRule::resolve(
            "defer-glasses",
            Category::Eyes,
            Has(Feature::Glasses),
            [GLASSES_BASE],
        ),
    ]
}

fn head_rules() -> Vec<ConflictRule> {
    vec![
        // Drawn on the Jewelry step instead, above everything else
        ConflictRule::resolve(
            "beanie-oversized-head",
            Category::Head,
            All(&[Has(Feature::Beanie), Has(Feature::Oversized)]),
            [Effect::Hold(
                Category::Head,
                Source::Special("beanie-oversized-head"),
            )],
        ),
        ConflictRule::resolve(
            "goggles-robot-head",
            Category::Head,
            All(&[Has(Feature::Robot), Has(Feature::Goggles)]),
            [
                Effect::Hold(Category::Head, Source::Special("goggles-robot-head")),
                Effect::Draw(Source::Held(Category::Head)),
            ],
        ),
        ConflictRule::extra(
            "plasma-vision-over-bandana",
            Category::Head,
            All(&[Has(Feature::PlasmaVision), Has(Feature::BandanaMouth)]),
            [Effect::Draw(Source::Special("Plasma vision"))],
        ),
        ConflictRule::extra(
            "plasma-vision-bottom",
            Category::Head,
            All(&[Has(Feature::PlasmaVision), Lacks(Feature::BandanaMouth)]),
            [Effect::Draw(Source::Special("Plasma vision bottom"))],
        ),
        ConflictRule::extra(
            "plasma-vision-nostril",
            Category::Head,
            All(&[
                Has(Feature::PlasmaVision),
                Lacks(Feature::BandanaMouth),
                Has(Feature::Dumbfounded),
            ]),
            [Effect::Draw(Source::Special("Nostril"))],
        ),
    ]
}

fn mouth_rules() -> Vec<ConflictRule> {
    let mut rules = vec![
        ConflictRule::extra(
            "glasses-over-mouth",
            Category::Mouth,
            All(&[Has(Feature::Glasses), Not(&FLAME_UNDER_HAT)]),
            [Effect::Draw(Source::Held(Category::Eyes))],
        ),
        ConflictRule::extra(
            "big-head-over-glasses",
            Category::Mouth,
            Has(Feature::BigHead),
            [Effect::Draw(Source::Held(Category::Head))],
        ),
        ConflictRule::extra(
            "helmet-brim-over-glasses",
            Category::Mouth,
            All(&[Has(Feature::Glasses), Has(Feature::ArmyHelmet)]),
            [Effect::DrawCropped(
                Source::Held(Category::Head),
                CropRegion::from_origin(Extent::Full, Extent::Pixels(HELMET_BRIM_HEIGHT)),
            )],
        ),
        ConflictRule::extra(
            "goggle-band-over-glasses",
            Category::Mouth,
            GOGGLES_OVER_GLASSES,
            [Effect::DrawCropped(
                Source::Held(Category::Head),
                CropRegion::from_origin(Extent::Pixels(GOGGLE_BAND_WIDTH), Extent::Full),
            )],
        ),
        ConflictRule::extra(
            "oversized-goggle-line",
            Category::Mouth,
            All(&[GOGGLES_OVER_GLASSES, Has(Feature::Oversized)]),
            [Effect::Draw(Source::Special("Oversized Goggle Line"))],
        ),
        ConflictRule::substitute(
            "trooper-hat-bandana",
            Category::Mouth,
            All(&[Has(Feature::TrooperHat), Has(Feature::BandanaMouth)]),
            Source::Special("Trooper Hat Bandana"),
        ),
    ];

    // Puffer collars cover the lower lip; each mouth has a dedicated cut
    for (when, asset) in PUFFER_MOUTHS {
        rules.push(ConflictRule::resolve(
            asset,
            Category::Mouth,
            when,
            [
                Effect::Hold(Category::Mouth, Source::Special(asset)),
                Effect::Draw(Source::Held(Category::Mouth)),
            ],
        ));
    }
    rules
}

fn jewelry_rules() -> Vec<ConflictRule> {
    let robot_eyes = Source::Variant(Category::Eyes, "Robot");

    vec![
        ConflictRule::substitute(
            "beanie-oversized-head-last",
            Category::Jewelry,
            All(&[Has(Feature::Beanie), Has(Feature::Oversized)]),
            Source::Held(Category::Head),
        ),
        ConflictRule::extra(
            "sakura-mouth",
            Category::Jewelry,
            Has(Feature::Sakura),
            [Effect::Draw(Source::Held(Category::Mouth))],
        ),
        ConflictRule::extra(
            "braids-over-jewelry",
            Category::Jewelry,
            Any(&[Has(Feature::TwoToneBraids), Has(Feature::Dreadlocks)]),
            [Effect::Draw(Source::Held(Category::Head))],
        ),
        ConflictRule::extra(
            "grin-left",
            Category::Jewelry,
            All(&[TROOPER_OR_BACKWARDS_HAT, Has(Feature::Grin)]),
            [Effect::Draw(Source::Special("Grin Left"))],
        ),
        ConflictRule::extra(
            "rose-over-hat",
            Category::Jewelry,
            All(&[TROOPER_OR_BACKWARDS_HAT, Has(Feature::Rose)]),
            [Effect::Draw(Source::Held(Category::Mouth))],
        ),
        ConflictRule::extra(
            "plasma-vision-cut-bottom",
            Category::Jewelry,
            All(&[PLASMA_UNDER_COVER, Has(Feature::BandanaMouth)]),
            [Effect::Draw(Source::Special("Plasma vision cut bottom"))],
        ),
        ConflictRule::extra(
            "plasma-vision-over-cover",
            Category::Jewelry,
            All(&[PLASMA_UNDER_COVER, Lacks(Feature::BandanaMouth)]),
            [Effect::Draw(Source::Special("Plasma vision"))],
        ),
        ConflictRule::extra(
            "plasma-vision-cover-nostril",
            Category::Jewelry,
            All(&[
                PLASMA_UNDER_COVER,
                Lacks(Feature::BandanaMouth),
                Has(Feature::Dumbfounded),
            ]),
            [Effect::Draw(Source::Special("Nostril"))],
        ),
        ConflictRule::extra(
            "bandana-left",
            Category::Jewelry,
            All(&[Has(Feature::BackwardsHat), Has(Feature::BandanaMouth)]),
            [Effect::Draw(Source::Special("Bandana Left"))],
        ),
        ConflictRule::extra(
            "trooper-rose",
            Category::Jewelry,
            All(&[Has(Feature::TrooperHat), Has(Feature::Rose)]),
            [Effect::Draw(Source::Held(Category::Mouth))],
        ),
        ConflictRule::extra(
            "flame-shades-over-hat",
            Category::Jewelry,
            FLAME_UNDER_HAT,
            [Effect::Draw(Source::Variant(Category::Eyes, "Flame Shades"))],
        ),
        ConflictRule::extra(
            "panel-hat-over-sport-shades",
            Category::Jewelry,
            All(&[Has(Feature::PanelHat), Has(Feature::SportShades)]),
            [Effect::Draw(Source::Variant(Category::Head, "Panel Hat"))],
        ),
        ConflictRule::extra(
            "bandana-band-over-geometric",
            Category::Jewelry,
            All(&[SMALL_GLASSES_UNDER_BANDANA, Has(Feature::GeometricShades)]),
            [Effect::DrawCropped(
                Source::Held(Category::Head),
                CropRegion::from_origin(Extent::Pixels(GOGGLE_BAND_WIDTH), Extent::Full),
            )],
        ),
        ConflictRule::extra(
            "bandana-over-glasses",
            Category::Jewelry,
            All(&[SMALL_GLASSES_UNDER_BANDANA, Lacks(Feature::GeometricShades)]),
            [Effect::Draw(Source::Held(Category::Head))],
        ),
        ConflictRule::extra(
            "robot-antenna-over-hat",
            Category::Jewelry,
            All(&[
                Has(Feature::Robot),
                Any(&[Has(Feature::KnitBeanie), Has(Feature::PanelHat)]),
            ]),
            [Effect::DrawCropped(
                robot_eyes,
                CropRegion::anchored([855, 355], 50, 75),
            )],
        ),
        ConflictRule::extra(
            "robot-visor-over-bandana",
            Category::Jewelry,
            All(&[Has(Feature::BackwardsBandana), Has(Feature::Robot)]),
            [Effect::DrawCropped(
                robot_eyes,
                CropRegion::from_origin(Extent::Full, Extent::Pixels(ROBOT_VISOR_HEIGHT)),
            )],
        ),
        ConflictRule::extra(
            "eth-lasers",
            Category::Jewelry,
            Has(Feature::Lasers),
            [Effect::Draw(Source::Special("Laser"))],
        ),
        ConflictRule::extra(
            "joint-smoke",
            Category::Jewelry,
            Has(Feature::Joint),
            [Effect::Draw(Source::Special("Joint Smoke"))],
        ),
    ]
}

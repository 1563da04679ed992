use bitvec::array::BitArray;
use std::fmt;

/// Named flag derived from a token's trait assignment
///
/// The first block is matched directly against trait values; the last four
/// are unions of those and are filled in after matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    /// Laser beams from the eyes
    Lasers,
    /// Robot eyes
    Robot,
    /// Any goggles headwear
    Goggles,
    /// Two tone braids hair
    TwoToneBraids,
    /// Dreadlocks hair
    Dreadlocks,
    /// Messy hair
    MessyHair,
    /// Blonde braids hair
    BlondeBraids,
    /// Trooper hat
    TrooperHat,
    /// Any grin except the small one
    Grin,
    /// Small grin
    SmallGrin,
    /// Bored mouth other than unshaven
    Bored,
    /// Bored unshaven mouth
    BoredUnshaven,
    /// Phoneme mouth
    Phoneme,
    /// Discomfort mouth
    Discomfort,
    /// Army helmet
    ArmyHelmet,
    /// Bored mouth with a joint
    Joint,
    /// Backwards hat
    BackwardsHat,
    /// Plasma vision eyewear
    PlasmaVision,
    /// Flame shades
    FlameShades,
    /// Sport shades
    SportShades,
    /// The Don shades
    TheDonShades,
    /// Thick frame glasses
    ThickFrames,
    /// Thin shades
    ThinShades,
    /// Oversized glasses
    Oversized,
    /// Geometric shades
    GeometricShades,
    /// Bitcoin ballers glasses
    BitcoinBallers,
    /// Backwards bandana headwear
    BackwardsBandana,
    /// Beanie
    Beanie,
    /// Knit beanie
    KnitBeanie,
    /// Sweatband
    Sweatband,
    /// Zipped puffer jacket
    ZippedPuffer,
    /// Bandana worn on the head
    BandanaHead,
    /// Bandana worn over the mouth
    BandanaMouth,
    /// Dumbfounded mouth
    Dumbfounded,
    /// Rose held in the mouth
    Rose,
    /// Tongue out
    Tongue,
    /// Sakura headwear
    Sakura,
    /// Panel hat
    PanelHat,
    /// Any eyewear drawn above the head layer
    Glasses,
    /// Eyewear wide enough to collide with headwear
    BigGlasses,
    /// Voluminous hair or headwear drawn over the glasses
    BigHead,
    /// Headwear that covers the top of the head
    CoveredHead,
}

impl Feature {
    /// Number of features
    pub const COUNT: usize = 42;

    /// Every feature in declaration order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Lasers,
        Self::Robot,
        Self::Goggles,
        Self::TwoToneBraids,
        Self::Dreadlocks,
        Self::MessyHair,
        Self::BlondeBraids,
        Self::TrooperHat,
        Self::Grin,
        Self::SmallGrin,
        Self::Bored,
        Self::BoredUnshaven,
        Self::Phoneme,
        Self::Discomfort,
        Self::ArmyHelmet,
        Self::Joint,
        Self::BackwardsHat,
        Self::PlasmaVision,
        Self::FlameShades,
        Self::SportShades,
        Self::TheDonShades,
        Self::ThickFrames,
        Self::ThinShades,
        Self::Oversized,
        Self::GeometricShades,
        Self::BitcoinBallers,
        Self::BackwardsBandana,
        Self::Beanie,
        Self::KnitBeanie,
        Self::Sweatband,
        Self::ZippedPuffer,
        Self::BandanaHead,
        Self::BandanaMouth,
        Self::Dumbfounded,
        Self::Rose,
        Self::Tongue,
        Self::Sakura,
        Self::PanelHat,
        Self::Glasses,
        Self::BigGlasses,
        Self::BigHead,
        Self::CoveredHead,
    ];

    /// Kebab-case display name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lasers => "lasers",
            Self::Robot => "robot",
            Self::Goggles => "goggles",
            Self::TwoToneBraids => "two-tone-braids",
            Self::Dreadlocks => "dreadlocks",
            Self::MessyHair => "messy-hair",
            Self::BlondeBraids => "blonde-braids",
            Self::TrooperHat => "trooper-hat",
            Self::Grin => "grin",
            Self::SmallGrin => "small-grin",
            Self::Bored => "bored",
            Self::BoredUnshaven => "bored-unshaven",
            Self::Phoneme => "phoneme",
            Self::Discomfort => "discomfort",
            Self::ArmyHelmet => "army-helmet",
            Self::Joint => "joint",
            Self::BackwardsHat => "backwards-hat",
            Self::PlasmaVision => "plasma-vision",
            Self::FlameShades => "flame-shades",
            Self::SportShades => "sport-shades",
            Self::TheDonShades => "the-don-shades",
            Self::ThickFrames => "thick-frames",
            Self::ThinShades => "thin-shades",
            Self::Oversized => "oversized",
            Self::GeometricShades => "geometric-shades",
            Self::BitcoinBallers => "bitcoin-ballers",
            Self::BackwardsBandana => "backwards-bandana",
            Self::Beanie => "beanie",
            Self::KnitBeanie => "knit-beanie",
            Self::Sweatband => "sweatband",
            Self::ZippedPuffer => "zipped-puffer",
            Self::BandanaHead => "bandana-head",
            Self::BandanaMouth => "bandana-mouth",
            Self::Dumbfounded => "dumbfounded",
            Self::Rose => "rose",
            Self::Tongue => "tongue",
            Self::Sakura => "sakura",
            Self::PanelHat => "panel-hat",
            Self::Glasses => "glasses",
            Self::BigGlasses => "big-glasses",
            Self::BigHead => "big-head",
            Self::CoveredHead => "covered-head",
        }
    }

    const fn bit(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-size set of active features for one token
///
/// Built once per trait assignment and never changed afterwards; rules only
/// read it.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSet {
    bits: BitArray<[u64; 1]>,
}

impl FeatureSet {
    /// Set with no features active
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set containing exactly the given features
    pub fn from_features(features: &[Feature]) -> Self {
        let mut set = Self::empty();
        for &feature in features {
            set.insert(feature);
        }
        set
    }

    pub(crate) fn insert(&mut self, feature: Feature) {
        self.bits.set(feature.bit(), true);
    }

    /// Test feature membership
    pub fn contains(&self, feature: Feature) -> bool {
        self.bits.get(feature.bit()).as_deref() == Some(&true)
    }

    /// Test whether any of the features is active
    pub fn contains_any(&self, features: &[Feature]) -> bool {
        features.iter().any(|&feature| self.contains(feature))
    }

    /// Number of active features
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no features are active
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Active features in declaration order
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL
            .into_iter()
            .filter(move |&feature| self.contains(feature))
    }
}

impl fmt::Debug for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Feature::name).collect();
        write!(f, "FeatureSet({})", names.join(", "))
    }
}

//! Static vocabulary for name normalisation and exposure classification
//!
//! Ordered lookup tables mapping the token soup of exchange fund names to
//! canonical tags. Order matters in every table: more specific entries come
//! first and the first match wins per dimension.

/// Ordered alias table: alias spellings -> canonical tag
pub type Table = &'static [(&'static [&'static str], &'static str)];

/// Ordered term table: canonical tag -> match terms
pub type TermTable = &'static [(&'static str, &'static [&'static str])];

/// An issuer and its preference rank, lower = preferred dedup winner
#[derive(Debug, Clone, Copy)]
pub struct Provider {
    pub canonical: &'static str,
    pub priority: u8,
}

/// Priority assigned when no issuer is recognised in a name
pub const UNMATCHED_PRIORITY: u8 = 99;

pub const PROVIDERS: &[Provider] = &[
    Provider { canonical: "ISHARES", priority: 1 },
    Provider { canonical: "VANGUARD", priority: 2 },
    Provider { canonical: "AMUNDI", priority: 3 },
    Provider { canonical: "LYXOR", priority: 3 },
    Provider { canonical: "XTRACKERS", priority: 4 },
    Provider { canonical: "SPDR", priority: 5 },
    Provider { canonical: "INVESCO", priority: 6 },
    Provider { canonical: "UBS", priority: 7 },
    Provider { canonical: "DEKA", priority: 8 },
    Provider { canonical: "HSBC", priority: 9 },
    Provider { canonical: "WISDOMTREE", priority: 10 },
    Provider { canonical: "VANECK", priority: 11 },
    Provider { canonical: "PIMCO", priority: 12 },
    Provider { canonical: "FIDELITY", priority: 13 },
    Provider { canonical: "BLACKROCK", priority: 14 },
    Provider { canonical: "STATESTREET", priority: 15 },
    Provider { canonical: "DIMENSIONAL", priority: 16 },
    Provider { canonical: "OSSIAM", priority: 17 },
    Provider { canonical: "FLOSSBACH", priority: 18 },
    Provider { canonical: "DWS", priority: 19 },
    Provider { canonical: "GLOBALX", priority: 20 },
    Provider { canonical: "FRANKLIN", priority: 21 },
    Provider { canonical: "LGIM", priority: 22 },
    Provider { canonical: "ABRDN", priority: 23 },
    Provider { canonical: "NOMURA", priority: 24 },
    Provider { canonical: "TABULA", priority: 25 },
];

/// Issuer spellings seen in truncated exchange names, alias -> canonical.
/// The longest matching alias wins so "SS SPDR" beats "SS".
pub const PROVIDER_ALIASES: &[(&str, &str)] = &[
    ("ISHARES", "ISHARES"),
    ("ISHS", "ISHARES"),
    ("ISH", "ISHARES"),
    ("IS", "ISHARES"),
    ("SS SPDR", "SPDR"),
    ("SS", "SPDR"),
    ("SSGA", "SPDR"),
    ("XTRACKERS", "XTRACKERS"),
    ("XTRK", "XTRACKERS"),
    ("XTRAC", "XTRACKERS"),
    ("XTR", "XTRACKERS"),
    ("X", "XTRACKERS"),
    ("LYXOR", "LYXOR"),
    ("LYX", "LYXOR"),
    ("AMUNDI", "AMUNDI"),
    ("VANECK", "VANECK"),
    ("WISDOMTREE", "WISDOMTREE"),
    ("WT", "WISDOMTREE"),
    ("FRANKLIN", "FRANKLIN"),
    ("FRK", "FRANKLIN"),
    ("FTGF", "FRANKLIN"),
    ("INVESCO", "INVESCO"),
    ("INV", "INVESCO"),
    ("GLX", "GLOBALX"),
    ("VANGUARD", "VANGUARD"),
    ("VAN", "VANGUARD"),
    ("SPDR", "SPDR"),
    ("UBS", "UBS"),
    ("DEKA", "DEKA"),
    ("HSBC", "HSBC"),
    ("PIMCO", "PIMCO"),
    ("LGIM", "LGIM"),
];

/// Truncated or variant index-family and theme spellings, expanded before
/// any dimension matching. Applied in order, so "EURO STOXX 50" collapses
/// before the shorter "EURO STOXX" can eat its prefix.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("S&P 500", "SP500"),
    ("S&P500", "SP500"),
    ("SPTSE", "SPTSX"),
    ("STOXX 600", "STOXX600"),
    ("EURO STOXX 50", "EUROSTOXX50"),
    ("EURO STOXX", "EUROSTOXX"),
    ("ESTX50", "EUROSTOXX50"),
    ("ESTX 50", "EUROSTOXX50"),
    ("EX600", "STOXX600"),
    ("EURSTX", "EUROSTOXX"),
    ("ACWI", "ALLCOUNTRY"),
    ("ALL COUNTRY", "ALLCOUNTRY"),
    ("ALL-WORLD", "ALLWORLD"),
    ("FTSE ALL", "ALLWORLD"),
    ("UNITED KINGDOM", "UK"),
    ("UNITED STATES", "US"),
    ("U.S.", "US"),
    ("U.S.A.", "US"),
    ("SOUTH KOREA", "KOREA"),
    ("LATIN AMERICA", "LATAM"),
    ("LAT AM", "LATAM"),
    ("LATIN AM", "LATAM"),
    ("EASTERN EUROPE", "EASTERNEUROPE"),
    ("EAST EUROPE", "EASTERNEUROPE"),
    ("SOUTHEAST ASIA", "SOUTHEASTASIA"),
    ("ASIA EX JAPAN", "ASIAEXJAPAN"),
    ("ASIA EX-JAPAN", "ASIAEXJAPAN"),
    ("AXJ", "ASIAEXJAPAN"),
    ("EX JAPAN", "ASIAEXJAPAN"),
    ("EUROPE EX UK", "EUROPEEXUK"),
    ("PACIFIC EX JAPAN", "PACIFICEXJAPAN"),
    ("WORLD EX US", "WORLDEXUS"),
    ("WORLD EX-US", "WORLDEXUS"),
    ("EMERGING ASIA", "EMERGINGASIA"),
    ("FRONTIER MARKETS", "FRONTIERMARKETS"),
    ("NORTH AMERICA", "NORTHAMERICA"),
    ("ASIA PACIFIC", "ASIAPACIFIC"),
    ("ASIA-PACIFIC", "ASIAPACIFIC"),
    ("PAN EUROPE", "EUROPE"),
    ("PAN-EUROPE", "EUROPE"),
    ("PANEUROPE", "EUROPE"),
    ("EMERGING MARKETS", "EMERGINGMARKETS"),
    ("MINIMUM VOLATILITY", "MINVOL"),
    ("MINIMUM VARIANCE", "MINVOL"),
    ("LOW VOLATILITY", "MINVOL"),
    ("LOW VOL", "MINVOL"),
    ("MINVAR", "MINVOL"),
    ("LOWVOL", "MINVOL"),
    ("LOWVOLATILITY", "MINVOL"),
    ("MINIMUMVOLATILITY", "MINVOL"),
    ("MINIMUMVARIANCE", "MINVOL"),
    ("MIN VOL", "MINVOL"),
    ("HIGH DIVIDEND", "DIVIDEND"),
    ("HIGH DIV", "DIVIDEND"),
    ("HDY", "DIVIDEND"),
    ("DIVIDENDEN", "DIVIDEND"),
    ("EQUAL WEIGHT", "EQUALWEIGHT"),
    ("EQUAL WEIGHTED", "EQUALWEIGHT"),
    ("EQWT", "EQUALWEIGHT"),
    ("MULTI FACTOR", "MULTIFACTOR"),
    ("MULTI-FACTOR", "MULTIFACTOR"),
    ("SMALL CAP", "SMALLCAP"),
    ("SMALL-CAP", "SMALLCAP"),
    ("MID CAP", "MIDCAP"),
    ("MID-CAP", "MIDCAP"),
    ("LARGE CAP", "LARGECAP"),
    ("LARGE-CAP", "LARGECAP"),
    ("MEGA CAP", "MEGACAP"),
    ("SMALL MID", "SMID"),
    ("SMALL-MID", "SMID"),
    ("INVESTABLE MARKET", "IMI"),
    ("INFORMATION TECHNOLOGY", "TECHNOLOGY"),
    ("COMM SERVICES", "COMMUNICATIONS"),
    ("COMMUNICATION SERVICES", "COMMUNICATIONS"),
    ("REAL ESTATE", "REALESTATE"),
    ("CONSUMER DISCRETIONARY", "CONSUMERDISCRETIONARY"),
    ("CONSUMER STAPLES", "CONSUMERSTAPLES"),
    ("BASIC RESOURCES", "BASICRESOURCES"),
    ("NATURAL RESOURCES", "BASICRESOURCES"),
    ("BASICRESOURCE", "BASICRESOURCES"),
    ("SEMICNDCT", "SEMICONDUCTORS"),
    ("SEMICONDUCTOR", "SEMICONDUCTORS"),
    ("HLTHCARE", "HEALTHCARE"),
    ("HEALTH CARE", "HEALTHCARE"),
    ("CLEAN ENERGY", "CLEANENERGY"),
    ("RENEWABLE ENERGY", "CLEANENERGY"),
    ("CLOUD COMPUTING", "CLOUDCOMPUTING"),
    ("ARTIFICIAL INTELLIGENCE", "AI"),
    ("FUTURE MOBILITY", "FUTUREMOBILITY"),
    ("ELECTRIC VEHICLES", "FUTUREMOBILITY"),
    ("GOLD MINERS", "GOLDMINERS"),
    ("SILVER MINERS", "SILVERMINERS"),
    ("USTREASURY", "GOVBOND"),
    ("TRESURY", "GOVBOND"),
    ("TREASURY", "GOVBOND"),
    ("GOV BOND", "GOVBOND"),
    ("GOVERNMENT BOND", "GOVBOND"),
    ("CORP BOND", "CORPBOND"),
    ("CORPORATE BOND", "CORPBOND"),
    ("HIGH YIELD", "HIGHYIELD"),
    ("INFLATION LINKED", "INFLATIONLINKED"),
    ("INFLATION-LINKED", "INFLATIONLINKED"),
    ("INFL LINKED", "INFLATIONLINKED"),
    ("SHORT TERM", "SHORTDURATION"),
    ("SHORT-TERM", "SHORTDURATION"),
    ("LONG TERM", "LONGDURATION"),
    ("LONG-TERM", "LONGDURATION"),
    ("CONVERTIBLE", "CONVERTIBLEBOND"),
    ("PARIS ALIGNED", "PAB"),
    ("LOW CARBON", "LOWCARBON"),
    ("NET ZERO", "NETZERO"),
    ("FOSSIL FUEL FREE", "FOSSILFUELFREE"),
];

/// Region vocabulary. Index families resolve first so "EUROSTOXX50" lands
/// on EUROZONE before the generic "EUROPE" aliases get a look.
pub const REGIONS: Table = &[
    (&["EUROSTOXX50"], "EUROZONE"),
    (&["EUROSTOXX", "EUROSTX"], "EUROPE"),
    (&["STOXX600"], "EUROPE"),
    (&["ALLCOUNTRY", "ALLWORLD"], "GLOBAL"),
    (&["SP500", "RUSSELL1000"], "US"),
    (&["NASDAQ100"], "US"),
    (&["RUSSELL2000"], "US"),
    (&["SPTSX"], "CANADA"),
    (&["FTSEMIB"], "ITALY"),
    (&["CAC40"], "FRANCE"),
    (&["IBEX35"], "SPAIN"),
    (&["ASX200"], "AUSTRALIA"),
    (&["NIKKEI225"], "JAPAN"),
    (&["HANGSENGCHINA", "HANGSENG"], "CHINA"),
    (&["CSI300"], "CHINA"),
    (&["KOSPI"], "KOREA"),
    (&["SENSEX", "NIFTY"], "INDIA"),
    (&["MOEX"], "RUSSIA"),
    (&["TECDAX", "DAX", "MDAX", "SDAX"], "GERMANY"),
    (&["WORLD"], "WORLD"),
    (&["GLOBAL"], "GLOBAL"),
    (&["EMERGINGMARKETS", "EMERGING", "EM"], "EM"),
    (&["EUROPE", "EUROPEAN", "EMU"], "EUROPE"),
    (&["EUROZONE"], "EUROZONE"),
    (&["NORTHAMERICA"], "US"),
    (&["USA", "US"], "US"),
    (&["UK", "UNITEDKINGDOM"], "UK"),
    (&["JAPAN"], "JAPAN"),
    (&["CHINA"], "CHINA"),
    (&["INDIA"], "INDIA"),
    (&["GERMANY"], "GERMANY"),
    (&["FRANCE"], "FRANCE"),
    (&["SWITZERLAND"], "SWITZERLAND"),
    (&["CANADA"], "CANADA"),
    (&["AUSTRALIA"], "AUSTRALIA"),
    (&["KOREA"], "KOREA"),
    (&["BRAZIL"], "BRAZIL"),
    (&["TAIWAN"], "TAIWAN"),
    (&["MEXICO"], "MEXICO"),
    (&["INDONESIA"], "INDONESIA"),
    (&["VIETNAM"], "VIETNAM"),
    (&["THAILAND"], "THAILAND"),
    (&["SOUTHAFRICA"], "SOUTH-AFRICA"),
    (&["ASIAPACIFIC", "APAC"], "ASIA-PACIFIC"),
    (&["ASIA"], "ASIA"),
    (&["PACIFIC"], "PACIFIC"),
    (&["AFRICA"], "AFRICA"),
    (&["FRONTIERMARKETS", "FRONTIER"], "FRONTIER"),
    (&["INTERNATIONAL"], "WORLD"),
];

pub const SUBREGIONS: Table = &[
    (&["LATAM"], "LATAM"),
    (&["EASTERNEUROPE"], "EASTERN-EUROPE"),
    (&["SOUTHEASTASIA", "ASEAN"], "SE-ASIA"),
    (&["ASIAEXJAPAN"], "ASIA-EX-JP"),
    (&["EUROPEEXUK"], "EUROPE-EX-UK"),
    (&["PACIFICEXJAPAN"], "PACIFIC-EX-JP"),
    (&["WORLDEXUS"], "WORLD-EX-US"),
    (&["EMERGINGASIA"], "EMERGING-ASIA"),
    (&["NORDICS", "NORDIC", "SCANDINAVIA"], "NORDICS"),
    (&["GULF", "GCC"], "GULF"),
];

pub const FACTORS: Table = &[
    (&["VALUE", "VAL"], "VALUE"),
    (&["DIVIDEND", "DIV"], "DIVIDEND"),
    (&["MOMENTUM", "MOM"], "MOMENTUM"),
    (&["QUALITY", "QUAL"], "QUALITY"),
    (&["SMID"], "SMID"),
    (&["SMALLCAP", "SC"], "SMALLCAP"),
    (&["MIDCAP"], "MIDCAP"),
    (&["MEGACAP", "LARGECAP"], "LARGECAP"),
    (&["IMI"], "IMI"),
    (&["MINVOL"], "MINVOL"),
    (&["GROWTH"], "GROWTH"),
    (&["EQUALWEIGHT"], "EQUALWEIGHT"),
    (&["MULTIFACTOR"], "MULTIFACTOR"),
    (&["DEVELOPED"], "DEVELOPED"),
];

pub const SECTORS: Table = &[
    (&["SEMICONDUCTORS"], "SEMICONDUCTORS"),
    (&["TECHNOLOGY", "TECH"], "TECH"),
    (&["HEALTHCARE"], "HEALTHCARE"),
    (&["FINANCIALS", "FINANCIAL", "BANKS", "BANKING"], "FINANCIALS"),
    (&["BASICRESOURCES"], "BASIC-RESOURCES"),
    (&["MATERIALS"], "MATERIALS"),
    (&["ENERGY"], "ENERGY"),
    (&["UTILITIES"], "UTILITIES"),
    (&["INDUSTRIALS"], "INDUSTRIALS"),
    (&["REALESTATE"], "REAL-ESTATE"),
    (&["CONSUMERDISCRETIONARY", "DISCRETIONARY"], "CONSUMER-DISC"),
    (&["CONSUMERSTAPLES", "STAPLES"], "CONSUMER-STAPLES"),
    (&["COMMUNICATIONS", "TELECOM"], "COMMUNICATIONS"),
    (&["CYBERSECURITY"], "CYBERSECURITY"),
    (&["ROBOTICS", "AUTOMATION"], "ROBOTICS"),
    (&["WATER"], "WATER"),
    (&["CLEANENERGY"], "CLEAN-ENERGY"),
    (&["BIOTECHNOLOGY", "BIOTECH", "BIOPHARMA"], "BIOTECH"),
    (&["PHARMACEUTICALS", "PHARMA"], "PHARMA"),
    (&["CLOUDCOMPUTING"], "CLOUD"),
    (&["AI"], "AI"),
    (&["FUTUREMOBILITY"], "MOBILITY"),
    (&["GOLDMINERS"], "GOLD-MINERS"),
    (&["SILVERMINERS"], "SILVER-MINERS"),
    (&["MINERS", "MINING"], "MINERS"),
    (&["DEFENSE", "DEFENCE", "AEROSPACE"], "DEFENSE"),
    (&["INFRASTRUCTURE"], "INFRASTRUCTURE"),
    (&["AGRIBUSINESS", "AGRICULTURE"], "AGRICULTURE"),
];

pub const BOND_TYPES: Table = &[
    (&["GOVBOND"], "GOVERNMENT"),
    (&["CORPBOND"], "CORPORATE"),
    (&["HIGHYIELD"], "HIGH-YIELD"),
    (&["INFLATIONLINKED"], "INFLATION-LINKED"),
    (&["CONVERTIBLEBOND"], "CONVERTIBLE"),
    (&["BOND"], "AGGREGATE"),
];

pub const BOND_DURATIONS: Table = &[
    (&["SHORTDURATION"], "SHORT"),
    (&["LONGDURATION"], "LONG"),
];

/// Tokens marking a bond or fixed-income exposure. "RENTEN" covers the
/// German listing names.
pub const BOND_SIGNALS: &[&str] = &[
    "BOND",
    "RENTEN",
    "FIXED INCOME",
    "FIXEDINCOME",
    "GOVBOND",
    "CORPBOND",
    "HIGHYIELD",
    "INFLATIONLINKED",
    "AGGBOND",
    "CONVERTIBLEBOND",
];

pub const ESG_SIGNALS: &[&str] = &[
    "ESG",
    "SRI",
    "PAB",
    "CTB",
    "CLIMATE",
    "SUSTAINABLE",
    "RESPONSIBLE",
    "GREEN",
    "IMPACT",
    "LOWCARBON",
    "NETZERO",
    "FOSSILFUELFREE",
];

pub const HEDGE_SIGNALS: &[&str] = &["HEDGED", "HDG", "HDGD"];

/// Commodity vocabulary, (canonical, match terms). Terms include the
/// German spellings used on the venue. Generic basket terms come last so
/// "GOLD" wins over "COMMODITY" in "GOLD COMMODITY SECURITIES".
pub const COMMODITIES: TermTable = &[
    ("GOLD", &["GOLD", "XAU", "GOLDBARREN"]),
    ("SILVER", &["SILVER", "XAG", "SILBER"]),
    ("PLATINUM", &["PLATINUM", "XPT", "PLATIN"]),
    ("PALLADIUM", &["PALLADIUM", "XPD"]),
    ("COPPER", &["COPPER", "KUPFER"]),
    ("NICKEL", &["NICKEL"]),
    ("ZINC", &["ZINC", "ZINK"]),
    ("TIN", &["TIN", "ZINN"]),
    ("ALUMINIUM", &["ALUMINIUM", "ALUMINUM"]),
    ("COBALT", &["COBALT"]),
    ("LITHIUM", &["LITHIUM"]),
    ("OIL", &["CRUDE OIL", "BRENT", "WTI", "PETROLEUM"]),
    ("GAS", &["NATURAL GAS", "NAT GAS"]),
    ("WHEAT", &["WHEAT", "WEIZEN"]),
    ("CORN", &["CORN", "MAIS"]),
    ("SOYBEANS", &["SOYBEAN", "SOYA"]),
    ("CARBON", &["CARBON", "CO2", "EMISSION"]),
    ("PRECIOUS", &["PRECIOUS METALS", "PRECIOUS MET"]),
    ("INDUSTRIALMETALS", &["INDUSTRIAL METALS", "IND METALS"]),
    ("AGRICULTURE", &["AGRICULTURE", "AGRICULTURAL"]),
    ("LIVESTOCK", &["LIVESTOCK"]),
    (
        "BASKET",
        &[
            "BLOOMBERG COMMODITY",
            "BROAD COMMODITY",
            "DIVERSIFIED COMMODITY",
            "RICI",
            "COMMODITY",
        ],
    ),
];

/// Commodity wrapper modifiers, (canonical, match terms)
pub const COMMODITY_MODS: TermTable = &[
    ("HEDGED", &["HEDGED", "HDG", "HDGD", "CURRENCY HEDGED"]),
    ("2X", &["2X", "2EX", "DOUBLE LONG", "DAILY 2X"]),
    ("SHORT", &["SHORT", "INVERSE", "1X", "DAILY SHORT"]),
    ("MINERS", &["MINERS", "MINING", "MINE"]),
];

/// Preference rank for a canonical issuer name
pub fn provider_priority(canonical: &str) -> Option<u8> {
    PROVIDERS
        .iter()
        .find(|p| p.canonical == canonical)
        .map(|p| p.priority)
}

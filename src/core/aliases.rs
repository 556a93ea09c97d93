use crate::core::normalize::normalize_name;
use crate::domain::model::Category;
use std::collections::HashMap;

// 外部 API 拼寫 -> 打包資料中的正式名稱

const NAKSHATRA_ALIASES: &[(&str, &str)] = &[
    ("Aswini", "Aśvinī"),
    ("Ashvini", "Aśvinī"),
    ("Bharni", "Bharaṇī"),
    ("Kritika", "Kṛttikā"),
    ("Karthika", "Kṛttikā"),
    ("Rohni", "Rohiṇī"),
    ("Mrigasira", "Mṛgaśirā"),
    ("Mrigashirsha", "Mṛgaśirā"),
    ("Arudra", "Ārdrā"),
    ("Thiruvathira", "Ārdrā"),
    ("Punarpoosam", "Punarvasu"),
    ("Pushyami", "Puṣya"),
    ("Pooyam", "Puṣya"),
    ("Aslesha", "Āśleṣā"),
    ("Ashlesha", "Āśleṣā"),
    ("Makha", "Maghā"),
    ("Purva Phalguni", "Pūrvaphalgunī"),
    ("Poorva Phalguni", "Pūrvaphalgunī"),
    ("Uttara Phalguni", "Uttaraphalgunī"),
    ("Uthiram", "Uttaraphalgunī"),
    ("Chitra", "Citrā"),
    ("Chithirai", "Citrā"),
    ("Swati", "Svātī"),
    ("Swathi", "Svātī"),
    ("Vishakha", "Viśākhā"),
    ("Visakha", "Viśākhā"),
    ("Anusham", "Anurādhā"),
    ("Jyeshta", "Jyeṣṭhā"),
    ("Jyestha", "Jyeṣṭhā"),
    ("Kettai", "Jyeṣṭhā"),
    ("Moola", "Mūla"),
    ("Purva Ashadha", "Pūrvāṣāḍhā"),
    ("Purvashada", "Pūrvāṣāḍhā"),
    ("Poorvashada", "Pūrvāṣāḍhā"),
    ("Uttara Ashadha", "Uttarāṣāḍhā"),
    ("Uttarashada", "Uttarāṣāḍhā"),
    ("Sravana", "Śravaṇa"),
    ("Shravan", "Śravaṇa"),
    ("Thiruvonam", "Śravaṇa"),
    ("Dhanishta", "Dhaniṣṭhā"),
    ("Dhanista", "Dhaniṣṭhā"),
    ("Avittam", "Dhaniṣṭhā"),
    ("Shatabhishak", "Śatabhiṣā"),
    ("Satabhisha", "Śatabhiṣā"),
    ("Sadayam", "Śatabhiṣā"),
    ("Purva Bhadrapada", "Pūrvabhādrapadā"),
    ("Poorvabhadra", "Pūrvabhādrapadā"),
    ("Uttara Bhadrapada", "Uttarabhādrapadā"),
    ("Uttarabhadra", "Uttarabhādrapadā"),
    ("Revathi", "Revatī"),
];

const TITHI_ALIASES: &[(&str, &str)] = &[
    ("Prathama", "Pratipadā"),
    ("Padyami", "Pratipadā"),
    ("Pratipat", "Pratipadā"),
    ("Dwitiya", "Dvitīyā"),
    ("Dvithiya", "Dvitīyā"),
    ("Vidiya", "Dvitīyā"),
    ("Trithiya", "Tṛtīyā"),
    ("Thritiya", "Tṛtīyā"),
    ("Chathurthi", "Caturthī"),
    ("Chavithi", "Caturthī"),
    ("Panchmi", "Pañcamī"),
    ("Shashti", "Ṣaṣṭhī"),
    ("Sashti", "Ṣaṣṭhī"),
    ("Ashtmi", "Aṣṭamī"),
    ("Navmi", "Navamī"),
    ("Dasami", "Daśamī"),
    ("Ekadasi", "Ekādaśī"),
    ("Dvadashi", "Dvādaśī"),
    ("Duvadasi", "Dvādaśī"),
    ("Trayodasi", "Trayodaśī"),
    ("Chaturdasi", "Caturdaśī"),
    ("Pournami", "Pūrṇimā"),
    ("Poornima", "Pūrṇimā"),
    ("Full Moon", "Pūrṇimā"),
    ("Amavasi", "Amāvāsyā"),
    ("Amavasai", "Amāvāsyā"),
    ("New Moon", "Amāvāsyā"),
];

const KARANA_ALIASES: &[(&str, &str)] = &[
    ("Baalava", "Bālava"),
    ("Kaulav", "Kaulava"),
    ("Taitula", "Taitila"),
    ("Garija", "Gara"),
    ("Vanij", "Vaṇija"),
    ("Banija", "Vaṇija"),
    ("Bhadra", "Viṣṭi"),
    ("Sakuni", "Śakuni"),
    ("Chatushpad", "Catuṣpada"),
    ("Nagava", "Nāga"),
    ("Kinstughna", "Kiṃstughna"),
];

const VARA_ALIASES: &[(&str, &str)] = &[
    ("Sunday", "Ravivara"),
    ("Monday", "Somavara"),
    ("Tuesday", "Mangalavara"),
    ("Wednesday", "Budhavara"),
    ("Thursday", "Guruvara"),
    ("Friday", "Shukravara"),
    ("Saturday", "Shanivara"),
    ("Domingo", "Ravivara"),
    ("Lunes", "Somavara"),
    ("Martes", "Mangalavara"),
    ("Miércoles", "Budhavara"),
    ("Jueves", "Guruvara"),
    ("Viernes", "Shukravara"),
    ("Sábado", "Shanivara"),
    ("Ravi", "Ravivara"),
    ("Aditya", "Ravivara"),
    ("Soma", "Somavara"),
    ("Chandra", "Somavara"),
    ("Mangala", "Mangalavara"),
    ("Mangal", "Mangalavara"),
    ("Bhauma", "Mangalavara"),
    ("Budha", "Budhavara"),
    ("Guru", "Guruvara"),
    ("Brihaspati", "Guruvara"),
    ("Shukra", "Shukravara"),
    ("Sukra", "Shukravara"),
    ("Shani", "Shanivara"),
    ("Sani", "Shanivara"),
];

const YOGA_ALIASES: &[(&str, &str)] = &[
    ("Vishkambha", "Viṣkambha"),
    ("Vishakumbha", "Viṣkambha"),
    ("Preeti", "Prīti"),
    ("Ayushmana", "Āyuṣmān"),
    ("Sobhana", "Śobhana"),
    ("Sukarman", "Sukarmā"),
    ("Soola", "Śūla"),
    ("Shoola", "Śūla"),
    ("Vridhi", "Vṛddhi"),
    ("Vyaghat", "Vyāghāta"),
    ("Harsana", "Harṣaṇa"),
    ("Vyatipat", "Vyatīpāta"),
    ("Variyana", "Varīyān"),
    ("Vareeyan", "Varīyān"),
    ("Subha", "Śubha"),
    ("Sukla", "Śukla"),
    ("Indra", "Aindra"),
    ("Vaidhruti", "Vaidhṛti"),
];

const SPECIAL_YOGA_ALIASES: &[(&str, &str)] = &[
    ("Amritasiddhi", "Amrita Siddhi Yoga"),
    ("Amrit Siddhi", "Amrita Siddhi Yoga"),
    ("Sarvarthasiddhi", "Sarvartha Siddhi Yoga"),
    ("Dwipushkar", "Dvipushkara Yoga"),
    ("Dwipushkara", "Dvipushkara Yoga"),
    ("Tripushkar", "Tripushkara Yoga"),
    ("Ravi Pushya", "Ravi Pushya Yoga"),
    ("Guru Pushya", "Guru Pushya Yoga"),
    ("Vish Yoga", "Visha Yoga"),
    ("Mrityu", "Mrityu Yoga"),
];

/// 單一類別的別名表，以正規化後的外部拼寫為鍵
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    pairs: Vec<(String, String)>,
    by_key: HashMap<String, usize>,
}

impl AliasTable {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut table = Self::default();
        for (external, canonical) in pairs {
            table.insert(external, canonical);
        }
        table
    }

    /// 後加入的同鍵別名覆蓋先前的
    pub fn insert(&mut self, external: &str, canonical: &str) {
        let key = normalize_name(external);
        if key.is_empty() {
            return;
        }
        match self.by_key.get(&key) {
            Some(&position) => {
                self.pairs[position] = (external.to_string(), canonical.to_string());
            }
            None => {
                self.by_key.insert(key, self.pairs.len());
                self.pairs.push((external.to_string(), canonical.to_string()));
            }
        }
    }

    pub fn lookup(&self, raw: &str) -> Option<&str> {
        let position = *self.by_key.get(&normalize_name(raw))?;
        Some(self.pairs[position].1.as_str())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(e, c)| (e.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AliasTables {
    tables: HashMap<Category, AliasTable>,
    empty: AliasTable,
}

impl AliasTables {
    pub fn builtin() -> Self {
        let mut tables = HashMap::new();
        for category in Category::ALL {
            tables.insert(category, AliasTable::from_pairs(builtin_pairs(category)));
        }
        Self {
            tables,
            empty: AliasTable::default(),
        }
    }

    pub fn get(&self, category: Category) -> &AliasTable {
        self.tables.get(&category).unwrap_or(&self.empty)
    }

    pub fn insert(&mut self, category: Category, external: &str, canonical: &str) {
        self.tables
            .entry(category)
            .or_default()
            .insert(external, canonical);
    }
}

pub fn builtin_pairs(category: Category) -> &'static [(&'static str, &'static str)] {
    match category {
        Category::Nakshatra => NAKSHATRA_ALIASES,
        Category::Tithi => TITHI_ALIASES,
        Category::Karana => KARANA_ALIASES,
        Category::Vara => VARA_ALIASES,
        Category::Yoga => YOGA_ALIASES,
        Category::SpecialYoga => SPECIAL_YOGA_ALIASES,
    }
}

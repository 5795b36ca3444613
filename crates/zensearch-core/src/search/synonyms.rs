//! Synonym table, the concept ontology driving semantic expansion.
//!
//! The built-in table is a compile-time ordered perfect-hash map, so it costs
//! nothing to construct and iterates in declaration order. A replacement
//! table can be loaded from TOML:
//!
//! ```toml
//! [[concept]]
//! name  = "冥想"
//! terms = ["打坐", "静坐", "禅修", "静心", "meditation"]
//! ```
//!
//! Either way the result is an immutable [`SynonymTable`] value handed to the
//! expander; nothing reads the table as global state.

use super::text;
use phf::phf_ordered_map;
use serde::Deserialize;
use std::path::Path;

static BUILTIN: phf::OrderedMap<&'static str, &'static [&'static str]> = phf_ordered_map! {
    // Synonyms
    "正念" => &["觉知", "专注", "当下", "静心", "mindfulness"],
    "冥想" => &["打坐", "静坐", "禅修", "静心", "meditation"],
    "呼吸" => &["呼吸法", "气息", "吸气", "呼气", "呼吸节奏"],
    "专注" => &["集中", "注意力", "专心", "聚焦"],
    "放松" => &["减压", "舒缓", "松弛", "舒眠", "平和"],
    "压力" => &["焦虑", "紧张", "不安", "烦躁"],
    "睡眠" => &["入睡", "失眠", "休息", "舒眠", "助眠"],
    "感恩" => &["幸福", "感谢", "珍惜", "美好"],
    "身体" => &["身心", "躯体", "感受", "觉察"],
    "自我" => &["自己", "内心", "内在", "本我"],

    // Level and length
    "入门" => &["基础", "简单", "初级", "学前", "0基础"],
    "进阶" => &["高级", "深入", "资深", "中级", "提升"],
    "短时间" => &["快速", "简短", "7天", "5分钟", "10分钟"],
    "长时间" => &["深度", "完整", "21天", "30天", "进阶"],

    // Goals
    "减压" => &["压力管理", "放松", "舒缓压力", "平和心境"],
    "睡眠改善" => &["失眠", "睡眠质量", "助眠", "舒眠", "深度睡眠"],
    "专注力提升" => &["注意力", "集中精神", "工作效率", "专注冥想"],
    "情绪平衡" => &["情绪管理", "心情", "平静心灵", "缓解焦虑"],
    "灵性成长" => &["觉醒", "意识拓展", "精神成长", "禅修"],
    "自我成长" => &["接纳自我", "和解", "自我认知", "自我关爱"],
    "幸福感" => &["幸福冥想", "感恩", "快乐", "满足"],

    // Course families
    "基础课程" => &["7天基础冥想", "冥想学前课", "入门必修课"],
    "进阶课程" => &["21天进阶冥想", "8天禅修冥想", "正念静心之旅"],
    "专注系列" => &["7天专注冥想", "专注力冥想", "工作专注力"],
    "睡眠系列" => &["7天舒眠冥想", "睡眠冥想", "助眠冥想"],
    "情绪系列" => &["缓解焦虑", "平和心境", "情绪管理"],
    "音乐辅助" => &["冥想纯音乐", "脑波音乐", "放松音乐"],
};

// ---------------------------------------------------------------------------
// Concept
// ---------------------------------------------------------------------------

/// One table entry: a canonical concept and its related terms.
#[derive(Debug, Clone, PartialEq)]
pub struct Concept {
    pub name: String,
    pub terms: Vec<String>,
    folded_name: String,
    folded_terms: Vec<String>,
}

impl Concept {
    pub fn new(name: impl Into<String>, terms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let name = name.into();
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        Self {
            folded_name: text::fold(&name),
            folded_terms: terms.iter().map(|t| text::fold(t)).collect(),
            name,
            terms,
        }
    }

    /// Lowercased concept name.
    pub fn folded_name(&self) -> &str {
        &self.folded_name
    }

    /// Lowercased terms, in the same order as [`Concept::terms`].
    pub fn folded_terms(&self) -> &[String] {
        &self.folded_terms
    }
}

// ---------------------------------------------------------------------------
// SynonymTable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SynonymTable {
    concepts: Vec<Concept>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Deserialize)]
struct RawConcept {
    name: String,
    #[serde(default)]
    terms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    concept: Vec<RawConcept>,
}

impl SynonymTable {
    /// The hand-curated table shipped with zensearch.
    pub fn builtin() -> Self {
        Self::from_concepts(
            BUILTIN
                .entries()
                .map(|(name, terms)| Concept::new(*name, terms.iter().copied())),
        )
    }

    pub fn from_concepts(concepts: impl IntoIterator<Item = Concept>) -> Self {
        Self { concepts: concepts.into_iter().collect() }
    }

    /// Parse a table from TOML `[[concept]]` entries.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTable = config::Config::builder()
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(Self::from_raw(raw))
    }

    /// Load a table from a TOML file on disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw: RawTable = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        tracing::info!(path = %path.display(), concepts = raw.concept.len(), "loaded synonym table");
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawTable) -> Self {
        Self::from_concepts(raw.concept.into_iter().map(|c| Concept::new(c.name, c.terms)))
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.name == name)
    }
}

//! Test builders: ergonomic constructors for `Course` and `Corpus`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use fake::faker::lorem::en::Words;
use fake::Fake;
use std::sync::Arc;
use zensearch_core::{Corpus, Course};

// ---------------------------------------------------------------------------
// CourseBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Course`] test fixtures.
///
/// Unset searched fields are left empty; unset metadata gets fixed defaults.
///
/// ```rust
/// let course = CourseBuilder::new(1, "7天基础冥想")
///     .keywords("入门, 呼吸")
///     .category("入门基础")
///     .build();
/// ```
pub struct CourseBuilder {
    course: Course,
}

impl CourseBuilder {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            course: Course {
                id,
                title: title.into(),
                keywords: String::new(),
                description: String::new(),
                level: "初级".to_string(),
                duration: 15,
                teacher: "Now团队".to_string(),
                category: "正念冥想".to_string(),
            },
        }
    }

    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.course.keywords = keywords.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.course.description = description.into();
        self
    }

    /// Random latin filler. Never contains CJK text, so it cannot match any
    /// Chinese query by accident.
    pub fn filler_description(mut self) -> Self {
        let words: Vec<String> = Words(3..8).fake();
        self.course.description = words.join(" ");
        self
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.course.level = level.into();
        self
    }

    pub fn duration(mut self, minutes: u32) -> Self {
        self.course.duration = minutes;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.course.category = category.into();
        self
    }

    pub fn build(self) -> Course {
        self.course
    }
}

/// Wrap courses into a shared corpus, panicking on duplicate ids.
pub fn corpus_of(courses: Vec<Course>) -> Arc<Corpus> {
    Arc::new(Corpus::new(courses).expect("test corpus has unique ids"))
}

/// `n` courses whose titles all contain `word`, with latin filler
/// descriptions. Ids run from 1.
pub fn uniform_corpus(word: &str, n: u64) -> Arc<Corpus> {
    corpus_of(
        (1..=n)
            .map(|id| {
                CourseBuilder::new(id, format!("{word} 第{id}课"))
                    .filler_description()
                    .build()
            })
            .collect(),
    )
}

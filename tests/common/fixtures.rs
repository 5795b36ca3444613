//! Static corpora used across harnesses.

use super::builders::{corpus_of, CourseBuilder};
use std::sync::Arc;
use zensearch_core::Corpus;

/// Five courses covering title, keyword and description hits plus one
/// course reachable only through the synonym table (`打坐` ⊂ 冥想).
pub fn meditation_corpus() -> Arc<Corpus> {
    corpus_of(vec![
        CourseBuilder::new(1, "冥想入门")
            .keywords("入门, 呼吸")
            .description("从呼吸开始的冥想练习")
            .category("入门基础")
            .build(),
        CourseBuilder::new(2, "打坐基础")
            .keywords("静坐, 姿势")
            .description("学习正确的坐姿")
            .category("入门基础")
            .build(),
        CourseBuilder::new(3, "舒眠引导")
            .keywords("睡眠, 放松")
            .description("睡前放松身体")
            .level("中级")
            .category("睡眠改善")
            .build(),
        CourseBuilder::new(4, "专注力训练")
            .keywords("专注, 注意力")
            .description("冥想帮助你回到当下")
            .category("专注力")
            .build(),
        CourseBuilder::new(5, "情绪平衡")
            .keywords("焦虑, 情绪管理")
            .description("温和地觉察情绪")
            .level("高级")
            .category("情绪管理")
            .build(),
    ])
}

/// Spreadsheet export in the layout `zensearch convert` reads.
pub const COURSES_CSV: &str = "\
title,share_title,share_description,content
7天舒眠冥想,舒眠,帮助入睡,睡前放松身体
21天进阶冥想,进阶,深入练习,
\"缓解焦虑, 平和心境\",焦虑,温和地觉察情绪,觉察情绪的来去

too,short
";

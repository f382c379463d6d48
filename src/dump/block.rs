//! Row-block construction: all INSERT statements for one headword

use super::escape::SqlLiteral;
use crate::models::WordEntry;

const HEADWORD_COLUMNS: &[&str] = &[
    "id",
    "word",
    "british_phonetics",
    "american_phonetics",
    "etymology",
    "difficulty_analysis",
    "semantic_relations",
    "cultural_context",
    "memory_aids",
    "grammatical_info",
    "metadata",
];

const DEFINITION_COLUMNS: &[&str] = &[
    "headword_id",
    "part_of_speech",
    "definition",
    "chinese_translation",
    "level",
    "frequency",
    "register",
];

const PHRASE_COLUMNS: &[&str] = &[
    "headword_id",
    "phrase",
    "meaning",
    "example",
    "example_translation",
    "frequency",
];

const EXAMPLE_COLUMNS: &[&str] = &[
    "headword_id",
    "sentence",
    "translation",
    "source",
    "difficulty",
];

/// The SQL text for one headword and its child rows, with child row counts.
#[derive(Debug, Clone)]
pub struct RowBlock {
    pub definitions: usize,
    pub phrases: usize,
    pub examples: usize,
    sql: String,
}

impl RowBlock {
    /// Build the block: headword first, then definitions, phrases and
    /// examples, each in source order.
    pub fn build(headword_id: u64, entry: &WordEntry) -> Self {
        let mut sql = String::new();
        let phonetics = entry.phonetics.as_ref();

        push_insert(
            &mut sql,
            "headwords",
            HEADWORD_COLUMNS,
            &[
                headword_id.to_sql(),
                entry.word.to_sql(),
                phonetics.and_then(|p| p.british.as_ref()).to_sql(),
                phonetics.and_then(|p| p.american.as_ref()).to_sql(),
                entry.etymology.to_sql(),
                entry.difficulty_analysis.to_sql(),
                entry.semantic_relations.to_sql(),
                entry.cultural_context.to_sql(),
                entry.memory_aids.to_sql(),
                entry.grammatical_info.to_sql(),
                entry.metadata.to_sql(),
            ],
        );

        for definition in &entry.definitions {
            push_insert(
                &mut sql,
                "definitions",
                DEFINITION_COLUMNS,
                &[
                    headword_id.to_sql(),
                    definition.part_of_speech.to_sql(),
                    definition.definition.to_sql(),
                    definition.chinese_translation.to_sql(),
                    definition.level.to_sql(),
                    definition.frequency.to_sql(),
                    definition.register.to_sql(),
                ],
            );
        }

        for phrase in &entry.phrases {
            push_insert(
                &mut sql,
                "phrases",
                PHRASE_COLUMNS,
                &[
                    headword_id.to_sql(),
                    phrase.phrase.to_sql(),
                    phrase.meaning.to_sql(),
                    phrase.example.to_sql(),
                    phrase.example_translation.to_sql(),
                    phrase.frequency.to_sql(),
                ],
            );
        }

        for example in &entry.examples {
            push_insert(
                &mut sql,
                "examples",
                EXAMPLE_COLUMNS,
                &[
                    headword_id.to_sql(),
                    example.sentence.to_sql(),
                    example.translation.to_sql(),
                    example.source.to_sql(),
                    example.difficulty.to_sql(),
                ],
            );
        }

        Self {
            definitions: entry.definitions.len(),
            phrases: entry.phrases.len(),
            examples: entry.examples.len(),
            sql,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.sql
    }

    /// Encoded size of the block in bytes
    pub fn byte_len(&self) -> u64 {
        self.sql.len() as u64
    }
}

fn push_insert(out: &mut String, table: &str, columns: &[&str], values: &[String]) {
    debug_assert_eq!(columns.len(), values.len());
    out.push_str("INSERT INTO ");
    out.push_str(table);
    out.push_str(" (");
    out.push_str(&columns.join(", "));
    out.push_str(") VALUES (");
    out.push_str(&values.join(", "));
    out.push_str(");\n");
}

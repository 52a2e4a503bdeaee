use docqa_core::types::Chunk;

pub const DEFINITION_TRIGGERS: &[&str] = &["what is", "define", "definition of", "meaning of"];

const DEFINITION_RULE: &str = "Provide a concise 1-2 line definition FIRST, then details.";

pub fn needs_definition(query: &str) -> bool {
    let lower = query.to_lowercase();
    DEFINITION_TRIGGERS.iter().any(|t| lower.contains(t))
}

/// `[Source i: filename]` followed by the full chunk text, one block per chunk.
pub fn context_block(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(i, c)| format!("[Source {}: {}]\n{}\n", i + 1, c.filename, c.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Context-only prompt: labelled sources, the question, and rules restricting
/// the model to those sources.
pub fn build_prompt(query: &str, chunks: &[Chunk]) -> String {
    let mut rules = vec![
        "ONLY answer using information from the documents below",
        "Do NOT use any external knowledge, general knowledge, or information from training data",
        "If the answer is NOT in the documents, respond: \"I don't have this information in the provided documents.\"",
        "Do NOT make up, infer, or assume information",
        "Always cite which document the information comes from",
        "Provide detailed, comprehensive answers using ALL relevant information from the documents",
        "Include all types, categories, characteristics, and details mentioned in the documents",
        "Use bullet points, numbering, or clear formatting when listing multiple items",
    ];
    if needs_definition(query) {
        rules.insert(0, DEFINITION_RULE);
    }
    let rules = rules
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {}", i + 1, r))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful AI assistant that answers questions EXCLUSIVELY and STRICTLY based on the provided documents.\n\n\
         CRITICAL RULES:\n{rules}\n\n\
         Documents:\n{context}\n\
         Question: {query}\n\n\
         Answer ONLY based on the documents above. Provide a comprehensive, detailed answer with all relevant \
         information. If information is not in documents, say so clearly:",
        context = context_block(chunks),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(filename: &str, text: &str) -> Chunk {
        Chunk {
            id: filename.into(),
            text: text.into(),
            filename: filename.into(),
            filepath: format!("/{filename}"),
            domain: "Other".into(),
            category: "Other".into(),
            similarity: 0.5,
            distance: 0.5,
            relevance_score: Some(1.0),
        }
    }

    #[test]
    fn sources_are_labelled_in_order_with_full_text() {
        let long = "y".repeat(2000);
        let prompt = build_prompt("Which port failed?", &[chunk("a.log", "[ERROR] Port 80 is in use"), chunk("b.txt", &long)]);
        let a = prompt.find("[Source 1: a.log]\n[ERROR] Port 80 is in use").expect("first source");
        let b = prompt.find("[Source 2: b.txt]").expect("second source");
        assert!(a < b);
        assert!(prompt.contains(&long));
        assert!(prompt.contains("Question: Which port failed?"));
        assert!(prompt.contains("CRITICAL RULES:\n1. ONLY answer"));
        assert!(!prompt.contains(DEFINITION_RULE));
    }

    #[test]
    fn definition_queries_lead_with_a_definition_rule() {
        for q in ["What is a balance sheet?", "Define SLA", "definition of churn", "Meaning of KYC"] {
            assert!(needs_definition(q), "{q}");
            let prompt = build_prompt(q, &[chunk("a.txt", "text")]);
            assert!(prompt.contains(&format!("1. {DEFINITION_RULE}")), "{q}");
        }
        assert!(!needs_definition("Which port failed?"));
    }
}

/// Builds the single-shot MCQ generation prompt. The `Q:/A:/B:/C:/D:/Correct:`
/// layout is load-bearing: the completion parser splits on exactly these
/// prefixes, so the template and `content::parser` must stay in sync.
pub fn quiz_prompt(document_text: &str, mcq_count: u32) -> String {
    format!(
        "\nBased on this content, generate exactly {mcq_count} multiple-choice questions:\n\
        \n\
        {document_text}\n\
        \n\
        Each question must have:\n\
        - Clear question text\n\
        - 4 options (A, B, C, D)\n\
        - One correct answer\n\
        \n\
        Format each question like this:\n\
        Q: [question text]\n\
        A: [option A]\n\
        B: [option B]\n\
        C: [option C]\n\
        D: [option D]\n\
        Correct: [A/B/C/D] LETTER NOT TEXT\n\
        \n\
        Make questions relevant to the content.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_document_and_count() {
        let prompt = quiz_prompt("The mitochondria is the powerhouse of the cell.", 3);

        assert!(prompt.contains("exactly 3 multiple-choice questions"));
        assert!(prompt.contains("powerhouse of the cell"));
        assert!(prompt.contains("Correct: [A/B/C/D]"));
    }
}

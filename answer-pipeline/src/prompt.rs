//! Prompt builders and system instructions.
//!
//! The literal reply tokens the pipeline parses (`YES`/`NO`, `NORMAL`/`SEARCH`,
//! `Not found`) are part of the contract with the model; keep them stable.

/// Appended to every system instruction.
pub const SCHOOL_TIMING_FACT: &str = "  (if they ask for school timings it is from 8:30 to 2:40)";

pub const SCHOOL: &str = "PM Shri Kendriya Vidyalaya Bolarum";

pub const SYS_CLASSIFIER: &str = "Question type classifier";
pub const SYS_SMALL_TALK: &str = "Friendly school assistant and your name is kenvi";
pub const SYS_REPHRASER: &str = "Query rephraser and your name is kenvi";
pub const SYS_STAFF: &str = "Staff info extractor and your name is kenvi";
pub const SYS_HOMEPAGE: &str = "School website explainer and your name is kenvi";
pub const SYS_RESPONDER: &str = "Short factual responder and your name is kenvi";
pub const SYS_VALIDATOR: &str = "Answer validation AI";
pub const SYS_TRANSLATOR: &str = "Hindi to English translator";
pub const SYS_HISTORY: &str = "Conversation history analyzer and your name is kenvi";

pub fn classify(question: &str) -> String {
    format!(
        "Classify the user question:\n\n'{question}'\n\n\
         If it's just a greeting, small talk, or casual (like 'hi', 'how are you', 'who are you'), reply ONLY 'NORMAL'. \
         If it needs factual or web-based info (like 'who is the principal of KV Bolarum'), reply ONLY 'SEARCH'."
    )
}

pub fn small_talk(question: &str) -> String {
    format!(
        "User said: {question}\n\nRespond naturally like a helpful assistant of Kendriya Vidyalaya Bolarum. Keep it short."
    )
}

pub fn rephrase(full_query: &str) -> String {
    format!("{full_query}\n\nRewrite this into a short search query about {SCHOOL}.")
}

pub fn staff_answer(question: &str, staff: &str) -> String {
    format!(
        "Question: {question}\nStaff Details:\n{staff}\n\n\
         From this staff list, identify the exact answer to the question if possible. \
         Answer directly in one short line with the name and role only."
    )
}

pub fn homepage_answer(question: &str, snippet: &str) -> String {
    format!(
        "Website text:\n[{snippet}]\n\n\
         Rewrite the relevant part of this text as an easy to understand answer to: {question}"
    )
}

pub fn web_answer(full_query: &str, formatted_results: &str) -> String {
    format!(
        "User Query: {full_query}\n\nSearch Results:\n{formatted_results}\n\n\
         You are KENVI, an assistant for {SCHOOL}. \
         Give a short, factual, direct answer in 1-2 lines. If not found, say 'Not found'."
    )
}

pub fn web_answer_retry(full_query: &str, formatted_results: &str) -> String {
    format!(
        "User Query: {full_query}\nResults:\n{formatted_results}\n\nAnswer shortly in 1-2 lines if possible."
    )
}

pub fn validate(question: &str, answer: &str) -> String {
    format!(
        "Question: {question}\nAnswer: {answer}\n\n\
         You are a factual checker. \
         If the answer correctly responds to the question, reply only 'YES'. \
         If it doesn't, reply only 'NO'."
    )
}

pub fn translate(text: &str) -> String {
    format!("Translate this Hindi or mixed text to clear English:\n\n{text}")
}

pub fn history(context: &str, question: &str) -> String {
    format!(
        "Conversation History:\n{context}\n\nQuestion: {question}\n\n\
         Based on the conversation history above, answer what the user previously asked or said. \
         Be specific and direct."
    )
}

/// Question with the client's conversation text prepended.
pub fn with_context(context: &str, question: &str) -> String {
    format!(
        "Previous Conversation:\n{context}\n\nCurrent Question: {question}\n\n\
         Instructions: Answer the current question. If it refers to previous messages \
         (like \"what did I ask?\"), reference the conversation history above."
    )
}

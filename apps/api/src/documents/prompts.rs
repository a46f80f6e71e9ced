pub const OCR_SYSTEM: &str = "You are an OCR engine. \
    Transcribe text exactly as it appears in the image. \
    Do NOT summarize, translate, correct, or comment.";

pub const OCR_PROMPT: &str = "\
    Extract all text from this resume image. \
    Preserve the reading order and put each line of the document on its own line. \
    Keep section headings, bullet text, dates, email addresses, phone numbers, and URLs verbatim. \
    Output only the extracted text.";

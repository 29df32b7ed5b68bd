//! Prompt templates sent to the language model.

/// Instructions for the answer step of the claim chat.
pub const CHAT_SYSTEM_PROMPT: &str = "You are an assistant for question-answering tasks. \
Use the following pieces of retrieved context to answer the question. \
If you don't know the answer, say that you don't know. \
Use three sentences maximum and keep the answer concise.";

pub const RETRIEVE_TOOL_NAME: &str = "retrieve";

pub const RETRIEVE_TOOL_DESCRIPTION: &str = "Retrieve information related to a query.";

/// Builds the adjudication prompt for one invoice.
///
/// The reply must be a single JSON object carrying the six decision fields.
pub fn adjudication_prompt(invoice_text: &str, policy_text: &str) -> String {
    format!(
        r#"You're Insurance claims analyst. Analyze this invoice against the policy and provide a response in EXACTLY this JSON format:
```json
{{
    "customer_name": "Customer Name here",
    "reimbursement_status": "accept | partially accept | reject",
    "reason": "Detailed explanation with Specific policy clauses and Approved Amount here",
    "date": "Invoice Date Here",
    "invoice_ID": "Invoice ID Here",
    "invoice_text": "specify invoice text content here"
}}
```

Policy Document:
{policy_text}

Invoice Details:
{invoice_text}

Important Rules:
1. All fields must be present
2. Values must be in double quotes
3. "reimbursement_status" must be one of: accept, partially accept, reject
4. Do not include any text outside the JSON brackets
5. First Name, Second Name and Third Name will all start with a capital letter.
6. Take care of extra spaces within the first name. Do not break the first name into parts (the second name starts with a capital letter), for example **A njane y a K** is **Anjaneya K**
7. Ensure the 'reason' field does not contain unescaped quotes or special characters.

Take care of some broken words:
1. **Cust omer Name** is **Customer Name**
2. **Inv oice Date** is **Date**
3. **Inv oice ID** is **Invoice ID**
"#
    )
}

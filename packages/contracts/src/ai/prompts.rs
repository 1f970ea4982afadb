//! Prompts for the contract field extraction call.
//!
//! The system prompt pins the model to JSON-only output; the user prompt
//! embeds the document text and file name and fixes the output keys to the
//! wire format of the intermediate files.

/// Fixed role-based system instruction.
pub const SYSTEM_PROMPT: &str = "You are a highly precise AI assistant specialized in extracting \
data from contract documents and formatting it as a JSON object. Your reply must contain ONLY \
the JSON object, with no extra text, explanation or markdown fences. If a field is not found in \
the text, its value must be `null`.";

/// Per-document user instruction.
pub fn extraction_prompt(text: &str, file_name: &str) -> String {
    format!(
        r#"Analyze the following venue-use permission term (file name: {file_name}) and extract the information into the requested JSON structure.

Specific instructions:
- `cliente.documento`: return only the digits of the CNPJ or CPF.
- `eventos[].valor_final`: return a number (float). If the event is free of charge, return 0.0.
- `eventos[].datas_evento`: return a list of strings, each date in "YYYY-MM-DD" format.

Document text:
---
{text}
---

Output JSON structure:
{{
  "cliente": {{
    "nome_razao_social": "string",
    "documento": "string",
    "tipo_pessoa": "string ('PJ' or 'PF')",
    "nome_responsavel": "string"
  }},
  "eventos": [
    {{
      "numero_processo": "string",
      "numero_termo": "string",
      "nome_evento": "string",
      "datas_evento": ["YYYY-MM-DD"],
      "hora_inicio": "string",
      "hora_fim": "string",
      "valor_final": 0.0,
      "espaco_utilizado": "string",
      "data_vigencia_final": "string",
      "numero_oficio_sei": "string"
    }}
  ]
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_document_and_file_name() {
        let prompt = extraction_prompt("CONTRATO DE TESTE", "termo_042.docx");
        assert!(prompt.contains("termo_042.docx"));
        assert!(prompt.contains("CONTRATO DE TESTE"));
        // The output contract must pin every wire key the parser expects.
        for key in [
            "nome_razao_social",
            "documento",
            "tipo_pessoa",
            "valor_final",
            "datas_evento",
            "espaco_utilizado",
        ] {
            assert!(prompt.contains(key), "prompt missing wire key {key}");
        }
    }
}

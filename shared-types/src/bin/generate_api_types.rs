use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Contact types
    types.push(clean_type(Contact::export_to_string()?));
    types.push(clean_type(CreateContactRequest::export_to_string()?));
    types.push(clean_type(UpdateContactRequest::export_to_string()?));
    types.push(clean_type(DeleteContactResponse::export_to_string()?));
    types.push(clean_type(ContactGroup::export_to_string()?));

    // Import types
    types.push(clean_type(ImportRowFailure::export_to_string()?));
    types.push(clean_type(ImportSummary::export_to_string()?));

    // Message types
    types.push(clean_type(MessageRecord::export_to_string()?));
    types.push(clean_type(Recipient::export_to_string()?));
    types.push(clean_type(SendSmsRequest::export_to_string()?));
    types.push(clean_type(DispatchOutcome::export_to_string()?));
    types.push(clean_type(SendSmsResponse::export_to_string()?));

    // User and session types
    types.push(clean_type(AdminUser::export_to_string()?));
    types.push(clean_type(SetupRequest::export_to_string()?));
    types.push(clean_type(UserCheckResponse::export_to_string()?));
    types.push(clean_type(LoginRequest::export_to_string()?));
    types.push(clean_type(SessionUser::export_to_string()?));
    types.push(clean_type(LogoutResponse::export_to_string()?));

    types.push(clean_type(ErrorResponse::export_to_string()?));

    let output_dir = Path::new("../gui/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Everything lands in one file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    format!("{}\n", filtered.join("\n").trim())
}

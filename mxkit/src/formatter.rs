use colored::*;
use mxkit_core::{
    AttributeDescriptor, ConfigurationError, ManagedObjectCatalog, OperationDescriptor,
};
use std::fmt::Display;
use std::path::PathBuf;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

pub struct GenericError<T: Display>(pub &'static str, pub T);

/// The outcome of validating one declaration file.
pub struct Validation {
    pub path: PathBuf,
    pub outcome: Result<ManagedObjectCatalog, FormattedString>,
}

pub struct ValidationReport(pub Vec<Validation>);

impl ValidationReport {
    pub fn has_failures(&self) -> bool {
        self.0.iter().any(|validation| validation.outcome.is_err())
    }
}

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<std::io::Error> for FormattedString {
    fn from(err: std::io::Error) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Failed to read file:".red().bold(),
            err
        ))
    }
}

impl From<serde_json::Error> for FormattedString {
    fn from(err: serde_json::Error) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Failed to parse class declaration:".red().bold(),
            err
        ))
    }
}

impl From<ConfigurationError> for FormattedString {
    fn from(err: ConfigurationError) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Invalid management interface:".red().bold(),
            err
        ))
    }
}

impl<T: Display> From<GenericError<T>> for FormattedString {
    fn from(GenericError(msg, err): GenericError<T>) -> Self {
        FormattedString(format!("{}:\n\n'{}'", msg.red().bold(), err))
    }
}

impl From<ManagedObjectCatalog> for FormattedString {
    fn from(catalog: ManagedObjectCatalog) -> Self {
        let mut out = String::new();

        if !catalog.description().is_empty() {
            out.push_str(&comment(catalog.description(), ""));
        }
        out.push_str(&format!(
            "{} {} {{\n",
            "managed".cyan(),
            catalog.class_name().green()
        ));

        for attribute in catalog.attributes() {
            out.push_str(&FormattedString::from(attribute).0);
            out.push('\n');
        }

        if !catalog.attributes().is_empty() && !catalog.operations().is_empty() {
            out.push('\n');
        }

        for operation in catalog.operations() {
            out.push_str(&FormattedString::from(operation).0);
            out.push('\n');
        }

        out.push('}');
        FormattedString(out)
    }
}

impl From<&AttributeDescriptor> for FormattedString {
    fn from(attribute: &AttributeDescriptor) -> Self {
        let access = match (attribute.is_readable(), attribute.is_writable()) {
            (true, true) => "readwrite",
            (true, false) => "readonly",
            (false, true) => "writeonly",
            (false, false) => "none",
        };

        FormattedString(format!(
            "{}  {} {} {} {};",
            comment(attribute.description(), "  "),
            "attribute".cyan(),
            access.purple(),
            attribute.ty().to_string().yellow(),
            attribute.name()
        ))
    }
}

impl From<&OperationDescriptor> for FormattedString {
    fn from(operation: &OperationDescriptor) -> Self {
        let params = operation
            .signature()
            .iter()
            .map(|ty| ty.to_string().yellow().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        FormattedString(format!(
            "{}  {} [{}] {} {}({});",
            comment(operation.description(), "  "),
            "operation".cyan(),
            operation.impact().to_string().purple(),
            operation.return_type().to_string().yellow(),
            operation.name().green(),
            params
        ))
    }
}

impl From<ValidationReport> for FormattedString {
    fn from(ValidationReport(validations): ValidationReport) -> Self {
        if validations.is_empty() {
            return FormattedString("No declarations given.".yellow().to_string());
        }

        let mut out = String::new();
        for validation in validations {
            let path = validation.path.display();
            match validation.outcome {
                Ok(catalog) => out.push_str(&format!(
                    "{} {} ({}: {} attribute(s), {} operation(s))\n",
                    "OK".green().bold(),
                    path,
                    catalog.class_name(),
                    catalog.attributes().len(),
                    catalog.operations().len()
                )),
                Err(FormattedString(err)) => {
                    out.push_str(&format!("{} {}\n", "FAILED".red().bold(), path));
                    for line in err.lines().filter(|line| !line.trim().is_empty()) {
                        out.push_str(&format!("  {line}\n"));
                    }
                }
            }
        }

        FormattedString(out.trim_end().to_string())
    }
}

/// Renders a description as `// ...` lines, or nothing if it is empty.
fn comment(description: &str, indent: &str) -> String {
    description
        .lines()
        .map(|line| format!("{indent}{}\n", format!("// {line}").dimmed()))
        .collect()
}

//! Starter boilerplates per language.
//!
//! Templates live on the client: a language switch sends the new
//! language together with its boilerplate, and the server resets the
//! shared buffer to whatever template the switching client supplied.

use coderoom_server::domain::Language;

const JAVASCRIPT_STARTER: &str = r#"// JavaScript Starter
function main() {
  console.log("Hello from coderoom!");
}

main();
"#;

const PYTHON_STARTER: &str = r#"# Python Starter
def main():
    print("Hello from coderoom!")

main()
"#;

const R_STARTER: &str = r#"# R Starter
print("Hello from R!")
summary(cars)
"#;

const JAVA_STARTER: &str = r#"// Java Starter
public class Main {
    public static void main(String[] args) {
        System.out.println("Hello World");
    }
}
"#;

/// The boilerplate a buffer is reset to when switching to `language`.
pub fn starter_template(language: Language) -> &'static str {
    match language {
        Language::JavaScript => JAVASCRIPT_STARTER,
        Language::Python => PYTHON_STARTER,
        Language::R => R_STARTER,
        Language::Java => JAVA_STARTER,
    }
}

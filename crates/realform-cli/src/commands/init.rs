//! The `realform init` command.

use std::path::Path;

use anyhow::Result;

const QUESTION_FILES: &[(&str, &str)] = &[
    ("Dressing.csv", include_str!("../../../../questions/Dressing.csv")),
    (
        "Hygiene_and_Grooming.csv",
        include_str!("../../../../questions/Hygiene_and_Grooming.csv"),
    ),
    ("Feeding.csv", include_str!("../../../../questions/Feeding.csv")),
    ("Toileting.csv", include_str!("../../../../questions/Toileting.csv")),
    (
        "Other_Functional_Mobility.csv",
        include_str!("../../../../questions/Other_Functional_Mobility.csv"),
    ),
    (
        "Housework_Chores.csv",
        include_str!("../../../../questions/Housework_Chores.csv"),
    ),
    (
        "Managing_Money_and_Shopping.csv",
        include_str!("../../../../questions/Managing_Money_and_Shopping.csv"),
    ),
    (
        "Meal_Preparation.csv",
        include_str!("../../../../questions/Meal_Preparation.csv"),
    ),
    (
        "Personal_Safety.csv",
        include_str!("../../../../questions/Personal_Safety.csv"),
    ),
    ("Travelling.csv", include_str!("../../../../questions/Travelling.csv")),
    (
        "School-Related_Skills.csv",
        include_str!("../../../../questions/School-Related_Skills.csv"),
    ),
];

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("realform.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("details.toml"), SAMPLE_DETAILS)?;

    let questions_dir = Path::new("questions");
    std::fs::create_dir_all(questions_dir)?;
    for (file, content) in QUESTION_FILES {
        write_if_missing(&questions_dir.join(file), content)?;
    }

    println!("\nNext steps:");
    println!("  1. Run: realform validate");
    println!("  2. Run: realform survey");
    println!("  3. Edit details.toml, then run: realform report --responses responses.csv --details details.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# realform configuration

questions_dir = "./questions"
responses_file = "./responses.csv"
output_dir = "./realform-results"
show_scores = false

# Sections are asked in the order listed. Omit to use the built-in order.
# [[sections]]
# domain = "ADL"
# category = "Dressing"
# file = "Dressing.csv"
"#;

const SAMPLE_DETAILS: &str = r#"# Respondent details used by `realform report`
child_first_name = "Alex"
child_last_name = "Example"
completed_by = "Sam Example"
relationship = "Parent"
therapist = "Jordan Smith"
# male, female or other
sex = "other"
"#;

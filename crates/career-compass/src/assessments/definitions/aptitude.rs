use super::super::domain::{AnswerOption, CategoryId, OutcomeEntry, Question, QuizKind};
use super::super::scoring::{LookupEntry, ScoringRule};
use super::{QuizDefinitionSpec, RecommendationPolicy};

pub(super) fn definition() -> QuizDefinitionSpec {
    QuizDefinitionSpec {
        kind: QuizKind::Aptitude,
        version: "1.0.0".to_string(),
        title: "Career Aptitude Test".to_string(),
        time_limit_secs: 600,
        rule: ScoringRule::IndexLookup {
            table: lookup_table(),
        },
        questions: questions(),
        catalog: catalog(),
        recommendation: RecommendationPolicy {
            top_n: 1,
            career_limit: None,
        },
    }
}

// Interest answers weigh double; career goal answers map onto the same four
// fields in a different option order. Other question categories are profile
// questions and carry no weight.
fn lookup_table() -> Vec<LookupEntry> {
    vec![
        LookupEntry::new("Interest", 0, &[("technology", 2)]),
        LookupEntry::new("Interest", 1, &[("science", 2)]),
        LookupEntry::new("Interest", 2, &[("commerce", 2)]),
        LookupEntry::new("Interest", 3, &[("arts", 2)]),
        LookupEntry::new("Career Goals", 0, &[("science", 1)]),
        LookupEntry::new("Career Goals", 1, &[("commerce", 1)]),
        LookupEntry::new("Career Goals", 2, &[("technology", 1)]),
        LookupEntry::new("Career Goals", 3, &[("arts", 1)]),
    ]
}

fn question(id: u32, category: &str, text: &str, options: [&str; 4]) -> Question {
    Question {
        id,
        text: text.to_string(),
        category: category.to_string(),
        options: options.into_iter().map(AnswerOption::positional).collect(),
    }
}

fn questions() -> Vec<Question> {
    vec![
        question(
            1,
            "Interest",
            "Which activity would you enjoy most on a free afternoon?",
            [
                "Building an app or taking apart a gadget",
                "Running an experiment or reading about a discovery",
                "Planning a small business or tracking money",
                "Drawing, writing or performing",
            ],
        ),
        question(
            2,
            "Work Style",
            "How do you prefer to work?",
            [
                "Alone, with deep focus",
                "In a small, close team",
                "Leading and organising a group",
                "Flexibly, switching between ideas",
            ],
        ),
        question(
            3,
            "Strengths",
            "Which of these comes most naturally to you?",
            [
                "Logical reasoning",
                "Careful observation",
                "Negotiating and persuading",
                "Expressing ideas creatively",
            ],
        ),
        question(
            4,
            "Interest",
            "Which school club would you join first?",
            [
                "Coding or robotics",
                "Science or astronomy",
                "Business or entrepreneurship",
                "Drama, music or art",
            ],
        ),
        question(
            5,
            "Career Goals",
            "What matters most to you in a future career?",
            [
                "Discovering how the world works",
                "Financial success and growth",
                "Building technology people use",
                "Creative freedom and self-expression",
            ],
        ),
        question(
            6,
            "Learning Style",
            "How do you learn best?",
            [
                "Hands-on practice",
                "Reading and research",
                "Case studies and discussion",
                "Visuals and storytelling",
            ],
        ),
        question(
            7,
            "Interest",
            "Which news story would you read first?",
            [
                "A new AI or smartphone launch",
                "A breakthrough in medicine or space",
                "Startup funding and market trends",
                "A film festival or book award",
            ],
        ),
        question(
            8,
            "Environment",
            "Where would you most like to work?",
            [
                "A tech company or from home",
                "A laboratory or hospital",
                "A corporate office or bank",
                "A studio, stage or newsroom",
            ],
        ),
        question(
            9,
            "Subjects",
            "Which subject do you look forward to most?",
            [
                "Computer science or mathematics",
                "Physics, chemistry or biology",
                "Accountancy or economics",
                "History, literature or languages",
            ],
        ),
        question(
            10,
            "Career Goals",
            "Where do you see yourself in ten years?",
            [
                "Leading a research project",
                "Running my own company",
                "Heading an engineering team",
                "Known for my creative work",
            ],
        ),
    ]
}

fn catalog() -> Vec<OutcomeEntry> {
    vec![
        OutcomeEntry {
            category: CategoryId::new("technology"),
            display_name: "Technology".to_string(),
            description: "You enjoy building things with logic and code and solving practical problems with technology.".to_string(),
            accent: "#2563eb".to_string(),
            careers: vec![
                "Software Engineer".to_string(),
                "Data Scientist".to_string(),
                "Cybersecurity Analyst".to_string(),
                "AI/ML Engineer".to_string(),
            ],
            subjects: vec![
                "Mathematics".to_string(),
                "Computer Science".to_string(),
                "Physics".to_string(),
            ],
        },
        OutcomeEntry {
            category: CategoryId::new("science"),
            display_name: "Science".to_string(),
            description: "You are curious about how nature works and like to investigate, experiment and discover.".to_string(),
            accent: "#16a34a".to_string(),
            careers: vec![
                "Doctor".to_string(),
                "Research Scientist".to_string(),
                "Biotechnologist".to_string(),
                "Pharmacist".to_string(),
            ],
            subjects: vec![
                "Physics".to_string(),
                "Chemistry".to_string(),
                "Biology".to_string(),
            ],
        },
        OutcomeEntry {
            category: CategoryId::new("commerce"),
            display_name: "Commerce".to_string(),
            description: "You think in terms of markets, money and people, and like organising and growing ventures.".to_string(),
            accent: "#d97706".to_string(),
            careers: vec![
                "Chartered Accountant".to_string(),
                "Financial Analyst".to_string(),
                "Entrepreneur".to_string(),
                "Marketing Manager".to_string(),
            ],
            subjects: vec![
                "Accountancy".to_string(),
                "Economics".to_string(),
                "Business Studies".to_string(),
            ],
        },
        OutcomeEntry {
            category: CategoryId::new("arts"),
            display_name: "Arts & Humanities".to_string(),
            description: "You express ideas creatively and are drawn to culture, language, society and design.".to_string(),
            accent: "#db2777".to_string(),
            careers: vec![
                "Graphic Designer".to_string(),
                "Journalist".to_string(),
                "Psychologist".to_string(),
                "Lawyer".to_string(),
            ],
            subjects: vec![
                "History".to_string(),
                "Literature".to_string(),
                "Fine Arts".to_string(),
            ],
        },
    ]
}

use super::super::domain::{AnswerOption, CategoryId, OutcomeEntry, Question, QuizKind};
use super::super::scoring::ScoringRule;
use super::{QuizDefinitionSpec, RecommendationPolicy};

pub(super) fn definition() -> QuizDefinitionSpec {
    QuizDefinitionSpec {
        kind: QuizKind::Stream,
        version: "1.0.0".to_string(),
        title: "Which Stream Suits You?".to_string(),
        time_limit_secs: 1200,
        rule: ScoringRule::WeightedMultiCategory,
        questions: questions(),
        catalog: catalog(),
        recommendation: RecommendationPolicy {
            top_n: 3,
            career_limit: None,
        },
    }
}

type Weights = &'static [(&'static str, u8)];

fn question(id: u32, category: &str, text: &str, options: [(&str, Weights); 4]) -> Question {
    Question {
        id,
        text: text.to_string(),
        category: category.to_string(),
        options: options
            .into_iter()
            .map(|(label, weights)| AnswerOption::weighted(label, weights))
            .collect(),
    }
}

const SCIENCE: Weights = &[("science", 3)];
const COMMERCE: Weights = &[("commerce", 3)];
const ARTS: Weights = &[("arts", 3)];

fn questions() -> Vec<Question> {
    vec![
        question(1, "Academic Interest", "Which subject do you score best in?", [
            ("Mathematics or science", SCIENCE),
            ("Accounts or economics", COMMERCE),
            ("History or languages", ARTS),
            ("A bit of everything", &[("science", 1), ("commerce", 1), ("arts", 1)]),
        ]),
        question(2, "Academic Interest", "Which homework do you finish first?", [
            ("Numerical problems", SCIENCE),
            ("Business case questions", COMMERCE),
            ("Essays and projects", ARTS),
            ("Data charts and graphs", &[("science", 2), ("commerce", 1)]),
        ]),
        question(3, "Academic Interest", "Which textbook would you read for fun?", [
            ("The universe and its laws", SCIENCE),
            ("How markets work", COMMERCE),
            ("World cultures and history", ARTS),
            ("Psychology of decisions", &[("commerce", 1), ("arts", 2)]),
        ]),
        question(4, "Academic Interest", "What kind of test do you prefer?", [
            ("Practical lab exams", SCIENCE),
            ("Accounting problems", COMMERCE),
            ("Open-ended writing", ARTS),
            ("Short quantitative answers", &[("science", 1), ("commerce", 2)]),
        ]),
        question(5, "Career Interest", "Which job shadowing day excites you?", [
            ("A day at a hospital or lab", SCIENCE),
            ("A day at a bank or startup", COMMERCE),
            ("A day at a newsroom or court", ARTS),
            ("A day at a design agency", &[("commerce", 1), ("arts", 2)]),
        ]),
        question(6, "Career Interest", "Which role model do you admire most?", [
            ("A scientist or engineer", SCIENCE),
            ("A business leader", COMMERCE),
            ("An author, lawyer or civil servant", ARTS),
            ("A tech founder", &[("science", 2), ("commerce", 2)]),
        ]),
        question(7, "Career Interest", "What would you like to create someday?", [
            ("A new medicine or machine", SCIENCE),
            ("A successful company", COMMERCE),
            ("A book, film or policy", ARTS),
            ("A popular app", &[("science", 2), ("arts", 1)]),
        ]),
        question(8, "Career Interest", "Which internship would you apply for?", [
            ("Research assistant", SCIENCE),
            ("Finance intern", COMMERCE),
            ("Editorial or NGO intern", ARTS),
            ("Marketing analytics intern", &[("commerce", 2), ("science", 1)]),
        ]),
        question(9, "Skills", "Which skill describes you best?", [
            ("Problem solving with formulas", SCIENCE),
            ("Handling money and numbers", COMMERCE),
            ("Communicating ideas", ARTS),
            ("Persuading people", &[("commerce", 2), ("arts", 1)]),
        ]),
        question(10, "Skills", "In a group project you usually...", [
            ("Run the experiments", SCIENCE),
            ("Manage the budget", COMMERCE),
            ("Write the report", ARTS),
            ("Present to the class", &[("commerce", 1), ("arts", 2)]),
        ]),
        question(11, "Skills", "Which competition would you enter?", [
            ("Science olympiad", SCIENCE),
            ("Business plan contest", COMMERCE),
            ("Debate or essay contest", ARTS),
            ("Hackathon", &[("science", 3), ("commerce", 1)]),
        ]),
        question(12, "Skills", "Which tool would you like to master?", [
            ("A microscope or oscilloscope", SCIENCE),
            ("Spreadsheets and ledgers", COMMERCE),
            ("A camera or a pen", ARTS),
            ("Statistics software", &[("science", 2), ("commerce", 2)]),
        ]),
        question(13, "Personality", "How do you make decisions?", [
            ("With evidence and experiments", SCIENCE),
            ("By weighing costs and benefits", COMMERCE),
            ("By considering people and values", ARTS),
            ("By gut feeling and creativity", &[("arts", 2), ("commerce", 1)]),
        ]),
        question(14, "Personality", "What do friends admire about you?", [
            ("Curiosity", SCIENCE),
            ("Practical sense", COMMERCE),
            ("Empathy and imagination", ARTS),
            ("Leadership", &[("commerce", 2), ("arts", 1)]),
        ]),
        question(15, "Personality", "How do you like to spend holidays?", [
            ("Visiting a science museum", SCIENCE),
            ("Helping in a family business", COMMERCE),
            ("Reading, travelling or writing", ARTS),
            ("Building a side project", &[("science", 2), ("commerce", 1)]),
        ]),
        question(16, "Personality", "What kind of problems interest you?", [
            ("How things work", SCIENCE),
            ("How to make things profitable", COMMERCE),
            ("Why people act as they do", ARTS),
            ("How to improve society", &[("arts", 2), ("science", 1)]),
        ]),
    ]
}

fn entry(
    category: &str,
    display_name: &str,
    description: &str,
    accent: &str,
    careers: &[&str],
    subjects: &[&str],
) -> OutcomeEntry {
    OutcomeEntry {
        category: CategoryId::new(category),
        display_name: display_name.to_string(),
        description: description.to_string(),
        accent: accent.to_string(),
        careers: careers.iter().map(|career| career.to_string()).collect(),
        subjects: subjects.iter().map(|subject| subject.to_string()).collect(),
    }
}

fn catalog() -> Vec<OutcomeEntry> {
    vec![
        entry(
            "science",
            "Science (PCM / PCB)",
            "Suited to analytical minds who enjoy experiments, mathematics and understanding nature.",
            "#0ea5e9",
            &[
                "Engineer",
                "Doctor",
                "Data Scientist",
                "Research Scientist",
                "Pharmacist",
                "Architect",
            ],
            &["Physics", "Chemistry", "Mathematics", "Biology", "Computer Science"],
        ),
        entry(
            "commerce",
            "Commerce",
            "Suited to practical thinkers interested in business, finance and the economy.",
            "#f97316",
            &[
                "Chartered Accountant",
                "Investment Banker",
                "Business Analyst",
                "Entrepreneur",
                "Economist",
                "Company Secretary",
            ],
            &["Accountancy", "Business Studies", "Economics", "Mathematics"],
        ),
        entry(
            "arts",
            "Arts & Humanities",
            "Suited to expressive, people-minded students drawn to society, language and culture.",
            "#8b5cf6",
            &[
                "Lawyer",
                "Journalist",
                "Psychologist",
                "Civil Services Officer",
                "Designer",
                "Teacher",
            ],
            &["History", "Political Science", "Psychology", "Sociology", "English Literature"],
        ),
    ]
}

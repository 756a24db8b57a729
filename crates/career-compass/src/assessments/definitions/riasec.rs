use super::super::domain::{AnswerOption, CategoryId, OutcomeEntry, Question, QuizKind};
use super::super::scoring::ScoringRule;
use super::{QuizDefinitionSpec, RecommendationPolicy};

pub(super) fn definition() -> QuizDefinitionSpec {
    QuizDefinitionSpec {
        kind: QuizKind::Riasec,
        version: "1.0.0".to_string(),
        title: "RIASEC Interest Profiler".to_string(),
        time_limit_secs: 900,
        rule: ScoringRule::SingleType,
        questions: questions(),
        catalog: catalog(),
        recommendation: RecommendationPolicy {
            top_n: 3,
            career_limit: Some(3),
        },
    }
}

const TYPES: [&str; 6] = ["R", "I", "A", "S", "E", "C"];

/// Options are listed in R, I, A, S, E, C order.
fn question(id: u32, category: &str, text: &str, labels: [&str; 6]) -> Question {
    Question {
        id,
        text: text.to_string(),
        category: category.to_string(),
        options: labels
            .into_iter()
            .zip(TYPES)
            .map(|(label, code)| AnswerOption::typed(label, code))
            .collect(),
    }
}

fn questions() -> Vec<Question> {
    vec![
        question(1, "Activities", "Which would you rather do on a weekend?", [
            "Repair a bicycle",
            "Solve a logic puzzle",
            "Paint or sketch",
            "Volunteer at a shelter",
            "Sell crafts at a fair",
            "Organise your collection",
        ]),
        question(2, "Activities", "Pick a school project you would volunteer for.", [
            "Build a model bridge",
            "Test water samples",
            "Design the event poster",
            "Tutor younger students",
            "Pitch the idea to the principal",
            "Keep the project budget",
        ]),
        question(3, "Activities", "Which task sounds most satisfying?", [
            "Assembling furniture",
            "Researching a mystery",
            "Writing a short story",
            "Helping a friend through a problem",
            "Convincing a team to follow a plan",
            "Sorting files into a system",
        ]),
        question(4, "Subjects", "Which class would you pick as an elective?", [
            "Woodwork or electronics",
            "Astronomy",
            "Music",
            "Psychology",
            "Business studies",
            "Accounting",
        ]),
        question(5, "Subjects", "Which assignment would you enjoy?", [
            "Fixing a small engine",
            "Analysing lab results",
            "Composing a song",
            "Interviewing community members",
            "Running a mock election campaign",
            "Preparing a spreadsheet report",
        ]),
        question(6, "Subjects", "Which topic would you read a book about?", [
            "How machines work",
            "How the brain works",
            "Famous artists",
            "Great teachers and healers",
            "Successful founders",
            "How banks keep records",
        ]),
        question(7, "Work Environment", "Where would you like to spend your workday?", [
            "Outdoors or in a workshop",
            "In a research lab",
            "In a studio",
            "In a school or clinic",
            "In a busy sales office",
            "In a quiet, orderly office",
        ]),
        question(8, "Work Environment", "Which team would you join?", [
            "The field repair crew",
            "The research group",
            "The creative team",
            "The support and care team",
            "The leadership team",
            "The operations team",
        ]),
        question(9, "Work Environment", "What kind of day sounds best?", [
            "Using tools and moving around",
            "Thinking through hard questions",
            "Making something original",
            "Talking with and helping people",
            "Meeting clients and closing deals",
            "Following a clear checklist",
        ]),
        question(10, "Skills", "Which skill would you most like to master?", [
            "Operating machinery",
            "Scientific reasoning",
            "Creative writing",
            "Counselling",
            "Public speaking",
            "Bookkeeping",
        ]),
        question(11, "Skills", "Friends usually ask you to...", [
            "Fix something that broke",
            "Explain how something works",
            "Help decorate or design",
            "Listen and give advice",
            "Take charge of the plan",
            "Keep track of details",
        ]),
        question(12, "Skills", "Which achievement would make you proudest?", [
            "Building a working robot",
            "Publishing a research finding",
            "Exhibiting your artwork",
            "Mentoring someone to success",
            "Growing a business",
            "Running a flawless audit",
        ]),
        question(13, "Hobbies", "Which hobby appeals to you most?", [
            "Gardening or camping",
            "Chess or coding puzzles",
            "Photography or dance",
            "Community service",
            "Debating or trading",
            "Journaling and planning",
        ]),
        question(14, "Hobbies", "What would you watch on a free evening?", [
            "A how-it's-made show",
            "A science documentary",
            "A musical or art film",
            "A show about teachers or doctors",
            "A business reality show",
            "A documentary on organisation and efficiency",
        ]),
        question(15, "Hobbies", "Which club would you start?", [
            "A maker club",
            "A science club",
            "A theatre club",
            "A peer support club",
            "An entrepreneurship club",
            "A finance and planning club",
        ]),
        question(16, "Values", "What matters most to you in a job?", [
            "Seeing tangible results",
            "Intellectual challenge",
            "Self-expression",
            "Helping others",
            "Influence and leadership",
            "Stability and structure",
        ]),
        question(17, "Values", "How would you like to be remembered?", [
            "As someone who built things",
            "As someone who discovered things",
            "As someone who created beauty",
            "As someone who cared for people",
            "As someone who led change",
            "As someone who was dependable",
        ]),
        question(18, "Values", "Which reward motivates you most?", [
            "Finishing a hands-on job",
            "Understanding a hard problem",
            "Recognition for originality",
            "Gratitude from people you helped",
            "Winning a competition",
            "Completing work accurately and on time",
        ]),
    ]
}

fn entry(
    code: &str,
    display_name: &str,
    description: &str,
    accent: &str,
    careers: &[&str],
    subjects: &[&str],
) -> OutcomeEntry {
    OutcomeEntry {
        category: CategoryId::new(code),
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
            "R",
            "Realistic",
            "Practical, hands-on doers who like working with tools, machines and the outdoors.",
            "#ef4444",
            &["Mechanical Engineer", "Civil Engineer", "Electrician", "Pilot", "Agricultural Scientist"],
            &["Physics", "Engineering Drawing", "Technical Education"],
        ),
        entry(
            "I",
            "Investigative",
            "Analytical thinkers who enjoy research, ideas and solving complex problems.",
            "#3b82f6",
            &["Research Scientist", "Data Analyst", "Doctor", "Astronomer"],
            &["Mathematics", "Biology", "Chemistry"],
        ),
        entry(
            "A",
            "Artistic",
            "Creative people who value self-expression, originality and unstructured work.",
            "#a855f7",
            &["Graphic Designer", "Architect", "Writer", "Musician"],
            &["Fine Arts", "Literature", "Music"],
        ),
        entry(
            "S",
            "Social",
            "Helpers who enjoy teaching, caring for and working closely with people.",
            "#22c55e",
            &["Teacher", "Counselor", "Nurse", "Social Worker"],
            &["Psychology", "Sociology", "Languages"],
        ),
        entry(
            "E",
            "Enterprising",
            "Persuasive leaders who like influencing people, taking risks and building ventures.",
            "#f59e0b",
            &["Entrepreneur", "Sales Manager", "Lawyer", "Politician"],
            &["Business Studies", "Economics", "Political Science"],
        ),
        entry(
            "C",
            "Conventional",
            "Organised, detail-minded people who like clear rules, data and structured tasks.",
            "#64748b",
            &["Accountant", "Banker", "Auditor", "Administrative Officer"],
            &["Accountancy", "Mathematics", "Informatics Practices"],
        ),
    ]
}

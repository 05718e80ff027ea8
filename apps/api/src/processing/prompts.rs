//! Prompt templates for resume extraction and evaluation.

pub const EXTRACTION_SYSTEM: &str =
    "You are a meticulous resume parser. You respond with a single JSON object and nothing else.";

pub const EVALUATION_SYSTEM: &str =
    "You are a technical recruiter. You respond with a single JSON object and nothing else.";

const EXTRACTION_TEMPLATE: &str = r#"Extract structured data from the resume text below.

Rules:
- Return ONLY a JSON object, no prose and no markdown fences.
- Use "" for missing string fields and [] for missing lists. Never invent data.
- "certificates" must only contain entries that appear under a heading such as
  CERTIFICATES, CERTIFICATIONS, COURSES, LICENSES, TRAINING, ACHIEVEMENTS or
  ACCOMPLISHMENTS. Do not pull certificates from projects or experience.
- Keep language entries exactly as written, including proficiency.

JSON structure:
{
  "name": "", "email": "", "phone": "",
  "linkedin": "", "github": "", "leetcode": "", "codechef": "",
  "languages": [],
  "education": {
    "10th": {"school": "", "location": "", "year": "", "percentage": ""},
    "12th": {"school": "", "location": "", "year": "", "percentage": ""},
    "bachelor": {"institute": "", "location": "", "degree": "", "expected_graduation": "", "cgpa": ""}
  },
  "skills": {"technical": [], "soft": [], "area_of_interest": []},
  "internships": [{"company": "", "role": "", "duration": "", "description": ""}],
  "projects": [{"title": "", "description": "", "technologies": []}],
  "certificates": [],
  "role_match": "",
  "summary": ""
}

Resume text:
{resume_text}"#;

const CERTIFICATE_TEMPLATE: &str = r#"Evaluate how much each certificate below strengthens a software engineering resume.

Return ONLY a JSON object of this shape, one entry per certificate, same order:
{
  "results": [
    {"certificate": "", "worthiness_score": 0, "highlight": false, "reason": ""}
  ]
}

worthiness_score is 0-100. highlight is true only for certificates worth
calling out to a recruiter. reason is one short sentence.

Certificates:
{certificates}"#;

const PROJECT_TEMPLATE: &str = r#"Analyze each project below from a recruiter's point of view.

Return ONLY a JSON object of this shape, one entry per project, same order:
{
  "projects": [
    {
      "project_title": "",
      "summary": "",
      "technologies": [],
      "domain": "",
      "problem_statement": "",
      "features": [],
      "impact": "",
      "complexity_level": "Intermediate",
      "relevance_score": 0,
      "missing_points": [],
      "recommended_improvements": [],
      "role_mapping": []
    }
  ]
}

Constraints:
- domain must be one of: Web Development, AI/ML, Cloud, Full Stack, Mobile App,
  IoT, Cybersecurity, Data Science, Automation, Other.
- complexity_level must be Beginner, Intermediate or Advanced.
- relevance_score is 0-100.
- role_mapping lists job titles the project supports, e.g. "Backend Engineer".

Projects:
{projects}"#;

const CHAT_TEMPLATE: &str = r#"You are assisting a recruiter who is reviewing one candidate's resume.
Answer the question using only the resume data below. If the answer is not in
the data, say so plainly. Keep the answer short and factual.

Resume data:
{resume_data}

Question: {query}"#;

pub fn extraction_prompt(resume_text: &str) -> String {
    EXTRACTION_TEMPLATE.replace("{resume_text}", resume_text)
}

pub fn certificate_prompt(certificates: &[String]) -> String {
    let listing = certificates
        .iter()
        .map(|c| format!("- {c}"))
        .collect::<Vec<_>>()
        .join("\n");
    CERTIFICATE_TEMPLATE.replace("{certificates}", &listing)
}

pub fn project_prompt(projects_json: &str) -> String {
    PROJECT_TEMPLATE.replace("{projects}", projects_json)
}

pub fn chat_prompt(resume_data: &str, query: &str) -> String {
    CHAT_TEMPLATE
        .replace("{resume_data}", resume_data)
        .replace("{query}", query)
}

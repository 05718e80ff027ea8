//! Static keyword dictionaries packaged as one immutable, injectable value.
//!
//! The lexicon is built once at startup and shared via `Arc` in `AppState`;
//! extractors and the scorer receive it by reference. Nothing here is
//! mutated after construction.

use regex::Regex;

/// A canonical skill or tool name plus the recognized alias spellings that
/// fold into it.
#[derive(Debug, Clone)]
pub struct SkillEntry {
    pub canonical: String,
    pub aliases: Vec<String>,
}

/// All dictionaries the analysis pipeline matches against: the skill synonym
/// table, the programming-language table, section heading phrases, and the
/// flat keyword lists used by the ATS rubric.
#[derive(Debug)]
pub struct SkillLexicon {
    pub skills: Vec<SkillEntry>,
    pub programming: Vec<SkillEntry>,
    pub skill_headings: Vec<String>,
    pub interest_headings: Vec<String>,
    pub boundary_headings: Vec<String>,
    pub tech_keywords: Vec<String>,
    pub tool_keywords: Vec<String>,
    pub soft_skills: Vec<String>,
    pub cert_keywords: Vec<String>,
    pub action_verbs: Regex,
}

impl SkillLexicon {
    /// Builds the lexicon from the built-in tables.
    pub fn builtin() -> Self {
        let verbs = format!(r"\b({})\b", ACTION_VERBS.join("|"));
        SkillLexicon {
            skills: entries(SKILL_SYNONYMS),
            programming: entries(PROGRAMMING_LANGUAGES),
            skill_headings: strings(SKILL_HEADINGS),
            interest_headings: strings(INTEREST_HEADINGS),
            boundary_headings: strings(BOUNDARY_HEADINGS),
            tech_keywords: strings(TECH_KEYWORDS),
            tool_keywords: strings(TOOL_KEYWORDS),
            soft_skills: strings(SOFT_SKILLS),
            cert_keywords: strings(CERT_KEYWORDS),
            action_verbs: Regex::new(&verbs).expect("valid action verb regex"),
        }
    }

    /// Folds a raw token to its canonical spelling: exact canonical or alias
    /// match wins, anything else passes through lowercased and trimmed.
    pub fn normalize_skill(&self, raw: &str) -> String {
        let s = raw.to_lowercase().trim().to_string();
        for entry in &self.skills {
            if s == entry.canonical || entry.aliases.iter().any(|a| *a == s) {
                return entry.canonical.clone();
            }
        }
        s
    }
}

fn entries(table: &[(&str, &[&str])]) -> Vec<SkillEntry> {
    table
        .iter()
        .map(|(canonical, aliases)| SkillEntry {
            canonical: (*canonical).to_string(),
            aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
        })
        .collect()
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// Canonical skill/tool spellings and their alias forms, including spacing
/// and vendor-prefix variants.
const SKILL_SYNONYMS: &[(&str, &[&str])] = &[
    ("excel", &["ms excel", "microsoft excel"]),
    ("power bi", &["powerbi"]),
    ("mysql", &["my sql", "my-sql"]),
    ("html", &["html5"]),
    ("css", &["css3"]),
    ("react", &["reactjs", "react js"]),
    ("node", &["nodejs", "node js"]),
    ("git", &["git version control"]),
    ("vscode", &["visual studio code", "vs code"]),
    ("jupyter", &["jupyter notebook", "jupyter lab"]),
    ("postman", &[]),
    ("insomnia", &[]),
    ("figma", &[]),
    ("sketch", &[]),
    ("invision", &[]),
    ("zeplin", &[]),
    ("adobe photoshop", &["photoshop"]),
    ("adobe illustrator", &["illustrator"]),
    ("adobe xd", &["xd"]),
    ("docker", &[]),
    ("docker compose", &["docker-compose"]),
    ("kubernetes", &["k8s"]),
    ("helm", &[]),
    ("istio", &[]),
    ("prometheus", &[]),
    ("grafana", &[]),
    ("kibana", &[]),
    ("elasticsearch", &["elastic search"]),
    ("logstash", &[]),
    ("filebeat", &[]),
    ("aws", &["amazon web services"]),
    ("ec2", &["amazon ec2"]),
    ("s3", &["amazon s3"]),
    ("lambda", &["aws lambda"]),
    ("azure", &["microsoft azure"]),
    ("gcp", &["google cloud platform", "google cloud"]),
    ("firebase", &["google firebase"]),
    ("heroku", &[]),
    ("digitalocean", &["digital ocean"]),
    ("jenkins", &[]),
    ("travis", &["travis ci"]),
    ("circleci", &["circle ci"]),
    ("ansible", &[]),
    ("puppet", &[]),
    ("chef", &[]),
    ("terraform", &[]),
    ("postgresql", &["postgres"]),
    ("mongodb", &[]),
    ("redis", &[]),
    ("memcached", &["memcache"]),
    ("kafka", &["apache kafka"]),
    ("rabbitmq", &["rabbit mq"]),
    ("hadoop", &["apache hadoop"]),
    ("spark", &["apache spark"]),
    ("flink", &["apache flink"]),
    ("cassandra", &["apache cassandra"]),
    ("couchdb", &["apache couchdb"]),
    ("hbase", &["apache hbase"]),
    ("hive", &["apache hive"]),
    ("dynamodb", &["amazon dynamodb"]),
    ("tensorflow", &[]),
    ("pytorch", &[]),
    ("tableau", &[]),
    ("sap", &[]),
    ("salesforce", &[]),
    ("oracle", &["oracle db", "oracle database"]),
    ("mssql", &["microsoft sql server", "sql server"]),
    ("linux", &[]),
    ("unix", &[]),
    ("bash", &["bash scripting", "shell scripting"]),
    ("powershell", &[]),
    ("rhel", &["red hat enterprise linux"]),
    ("ubuntu", &[]),
    ("centos", &[]),
    ("wordpress", &[]),
    ("drupal", &[]),
    ("magento", &[]),
    ("shopify", &[]),
    ("woocommerce", &["woo commerce"]),
    ("seo", &["search engine optimization"]),
    ("jira", &[]),
    ("confluence", &[]),
    ("trello", &[]),
    ("asana", &[]),
    ("slack", &[]),
    ("zoom", &[]),
    ("teams", &["microsoft teams"]),
    ("skype", &[]),
    ("webex", &["cisco webex"]),
    ("vmware", &[]),
    ("virtualbox", &[]),
    ("wireshark", &[]),
    ("tcp/ip", &["tcp", "ip"]),
    ("dns", &["domain name system"]),
    ("dhcp", &["dynamic host configuration protocol"]),
    ("vpn", &["virtual private network"]),
    ("ldap", &["lightweight directory access protocol"]),
    ("active directory", &["ad"]),
    ("oauth", &["oauth 2.0"]),
    ("jwt", &["json web token"]),
    ("rest", &["restful", "rest api"]),
    ("graphql", &["graph ql"]),
    ("soap", &[]),
    ("grpc", &[]),
    ("swagger", &["openapi"]),
    ("junit", &[]),
    ("testng", &[]),
    ("selenium", &[]),
    ("cypress", &[]),
    ("jest", &[]),
    ("mocha", &[]),
    ("jasmine", &[]),
    ("pytest", &[]),
    ("unittest", &["python unittest"]),
    ("gitlab", &["gitlab ci/cd"]),
    ("github", &["github actions"]),
    ("bitbucket", &[]),
    ("nginx", &["engine x"]),
    ("apache", &["apache http server"]),
    ("iis", &["internet information services"]),
    ("tomcat", &["apache tomcat"]),
    ("jboss", &[]),
    ("weblogic", &["oracle weblogic server"]),
    ("websphere", &["ibm websphere"]),
];

/// Programming languages with alias spellings. Canonical display form is the
/// capitalized key ("c++" → "C++").
const PROGRAMMING_LANGUAGES: &[(&str, &[&str])] = &[
    ("c", &["c language", "c lang"]),
    ("c++", &["cpp", "c plus plus"]),
    ("java", &["core java", "advanced java"]),
    ("python", &["python programming"]),
    ("javascript", &["nodejs", "node js"]),
    ("typescript", &[]),
    ("ruby", &[]),
    ("go", &["golang"]),
    ("swift", &[]),
    ("kotlin", &[]),
    ("php", &["php language"]),
    ("r", &["r language"]),
    ("matlab", &[]),
    ("scala", &[]),
    ("perl", &[]),
];

/// Section headings that introduce a technical-skills block. Matched
/// case-insensitively as substrings, not anchored to line starts.
const SKILL_HEADINGS: &[&str] = &[
    "technical skills",
    "technical skill",
    "skillset",
    "skills",
    "tech skills",
    "core skills",
    "key skills",
    "hard skills",
    "professional skills",
    "technical proficiencies",
    "technical proficiency",
    "technical expertise",
    "software skills",
    "tools & technologies",
    "tools and technologies",
    "technologies",
    "tech stack",
    "technical toolkit",
    "programming skills",
    "programming languages",
    "programming language",
    "it skills",
    "computer skills",
    "domain skills",
    "specialized skills",
    "primary skills",
    "relevant skills",
    "development skills",
    "technical competencies",
    "skill highlights",
    "skills highlights",
    "languages",
    "language",
    "technical tools",
    "software tools",
    "developer tools",
    "tools",
    "tool",
];

/// Section headings that introduce an areas-of-interest block.
const INTEREST_HEADINGS: &[&str] = &[
    "area of interest",
    "areas of interest",
    "interest areas",
    "interests",
    "technical interests",
    "professional interests",
    "career interests",
    "domain interests",
    "engineering interests",
    "fields of interest",
    "preferred domains",
    "preferred areas",
    "preferred technical areas",
    "specialization areas",
    "preferred fields",
    "passion",
    "my interests",
];

/// Headings that terminate a scoped section without starting one of the two
/// extracted categories.
const BOUNDARY_HEADINGS: &[&str] = &[
    "personal projects",
    "academic projects",
    "projects",
    "work experience",
    "professional experience",
    "experience",
    "internships",
    "internship",
    "education",
    "academic background",
    "certifications",
    "certification",
    "certificates",
    "certificate",
    "courses",
    "trainings",
    "achievements",
    "awards",
    "publications",
    "summary",
    "career objective",
    "objective",
    "profile",
    "declaration",
    "references",
    "hobbies",
    "extracurricular",
];

/// Technical keywords counted (as substrings) by the Skills Strength rubric
/// category, weighted 1.5 each.
const TECH_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "c++",
    "c#",
    "go",
    "node",
    "react",
    "angular",
    "vue",
    "javascript",
    "typescript",
    "mongodb",
    "mysql",
    "postgres",
    "sql",
    "redis",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "tensorflow",
    "pytorch",
    "scikit-learn",
    "pandas",
    "numpy",
    "fastapi",
    "django",
    "flask",
    "spring",
    "express",
    "rest",
    "graphql",
    "microservices",
];

/// Tooling keywords counted by the Skills Strength category, weighted 1.0.
const TOOL_KEYWORDS: &[&str] = &[
    "git",
    "github",
    "gitlab",
    "jira",
    "jenkins",
    "figma",
    "linux",
    "bash",
    "shell",
    "tableau",
    "power bi",
    "excel",
    "visual studio",
    "vscode",
    "colab",
];

const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "ownership",
    "adaptability",
];

const CERT_KEYWORDS: &[&str] = &[
    "certified",
    "certificate",
    "aws",
    "azure",
    "gcp",
    "oracle",
    "pmp",
    "scrum",
    "cisco",
];

const ACTION_VERBS: &[&str] = &[
    "developed",
    "built",
    "designed",
    "implemented",
    "managed",
    "optimized",
    "increased",
    "reduced",
    "led",
    "collaborated",
    "deployed",
    "created",
    "trained",
    "improved",
    "tested",
    "analyzed",
    "automated",
    "integrated",
    "streamlined",
    "orchestrated",
    "debugged",
    "resolved",
    "scaled",
    "architected",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_skill_canonical_passthrough() {
        let lexicon = SkillLexicon::builtin();
        assert_eq!(lexicon.normalize_skill("mysql"), "mysql");
        assert_eq!(lexicon.normalize_skill("React"), "react");
    }

    #[test]
    fn test_normalize_skill_alias_folds_to_canonical() {
        let lexicon = SkillLexicon::builtin();
        assert_eq!(lexicon.normalize_skill("ReactJS"), "react");
        assert_eq!(lexicon.normalize_skill("amazon web services"), "aws");
        assert_eq!(lexicon.normalize_skill("k8s"), "kubernetes");
        assert_eq!(lexicon.normalize_skill("MY SQL"), "mysql");
    }

    #[test]
    fn test_normalize_skill_unknown_lowercased() {
        let lexicon = SkillLexicon::builtin();
        assert_eq!(lexicon.normalize_skill("  Quantum Widgets "), "quantum widgets");
    }

    #[test]
    fn test_action_verb_regex_is_word_bounded() {
        let lexicon = SkillLexicon::builtin();
        assert_eq!(lexicon.action_verbs.find_iter("developed and led").count(), 2);
        // "delivered" contains "led" but must not match
        assert_eq!(lexicon.action_verbs.find_iter("delivered").count(), 0);
    }
}

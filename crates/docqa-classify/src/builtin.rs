//! Built-in keyword tables. Keywords are written naturally and normalized by
//! the same tokenizer used on classified text ("CI/CD" becomes `ci cd`).

use crate::taxonomy::{Category, Domain};

pub(crate) struct CategorySpec {
    name: &'static str,
    strong: &'static [&'static str],
    weak: &'static [&'static str],
}

pub(crate) struct DomainSpec {
    name: &'static str,
    strong: &'static [&'static str],
    weak: &'static [&'static str],
    categories: &'static [CategorySpec],
}

impl DomainSpec {
    pub(crate) fn build(&self) -> Domain {
        let categories = self
            .categories
            .iter()
            .map(|c| Category::new(c.name, c.strong, c.weak))
            .collect();
        Domain::new(self.name, self.strong, self.weak, categories)
    }
}

pub(crate) const BUILTIN_DOMAINS: &[DomainSpec] = &[
    DomainSpec {
        name: "Code",
        strong: &[
            "source code", "function", "nodejs", "express", "react", "jsx", "tsx", "algorithm",
            "recursion", "pytest", "middleware", "frontend", "backend", "javascript", "typescript",
            "python", "compiler", "unit test", "refactor", "git", "def", "console log", "usestate",
        ],
        weak: &[
            "code", "class", "import", "export", "return", "const", "interface", "component",
            "endpoint", "route", "handler", "hooks", "props", "state", "dom", "sorting", "searching",
            "binary tree", "assert", "mock", "coverage", "variable", "debug", "bug", "repository",
            "py", "js", "ts", "rs", "java", "cpp", "script",
        ],
        categories: &[
            CategorySpec {
                name: "Backend",
                strong: &["backend", "nodejs", "express", "middleware", "route handler", "rest api", "server side", "orm"],
                weak: &["endpoint", "database", "sql", "query", "route", "handler", "server", "request"],
            },
            CategorySpec {
                name: "Frontend",
                strong: &["react", "jsx", "tsx", "frontend", "css", "html", "vue", "angular", "dom"],
                weak: &["component", "hooks", "state", "props", "ui", "button", "layout", "classname"],
            },
            CategorySpec {
                name: "Algorithms",
                strong: &["algorithm", "recursion", "binary tree", "big o", "dynamic programming", "time complexity"],
                weak: &["sorting", "searching", "graph", "tree", "array", "complexity"],
            },
            CategorySpec {
                name: "Testing",
                strong: &["pytest", "unit test", "integration test", "test case", "jest", "unittest"],
                weak: &["assert", "mock", "coverage", "test", "fixture"],
            },
            CategorySpec {
                name: "Scripts",
                strong: &["bash", "shell script", "cron job", "automation script", "powershell"],
                weak: &["script", "cli", "argv", "sh"],
            },
        ],
    },
    DomainSpec {
        name: "Technology",
        strong: &[
            "docker", "kubernetes", "devops", "terraform", "jenkins", "ci/cd", "helm", "nginx", "uav",
            "drone", "quadcopter", "robotics", "mongodb", "postgres", "nosql", "elasticsearch",
            "openapi", "swagger", "api gateway", "aws", "lambda", "iam", "android", "ios", "apk",
            "jwt", "oauth", "tls", "microservices", "container",
        ],
        weak: &[
            "server", "deployment", "database", "sql", "network", "pipeline", "port", "service",
            "infrastructure", "api", "endpoint", "log", "error", "config", "flight", "aerial",
            "sensor", "certificate", "encryption", "build", "cloud", "mobile", "schema",
        ],
        categories: &[
            CategorySpec {
                name: "DevOps",
                strong: &["docker", "kubernetes", "devops", "terraform", "jenkins", "ci/cd", "helm", "nginx", "container", "health check"],
                weak: &["deployment", "pipeline", "port", "log", "image", "server", "retrying", "listening"],
            },
            CategorySpec {
                name: "Drones",
                strong: &["uav", "drone", "quadcopter", "aerial robotics", "flight controller", "autopilot"],
                weak: &["flight", "aerial", "robotics", "autonomous", "navigation", "path", "unit"],
            },
            CategorySpec {
                name: "Databases",
                strong: &["mongodb", "postgres", "postgresql", "nosql", "elasticsearch", "mysql", "redis", "database schema"],
                weak: &["database", "sql", "schema", "index", "query", "table"],
            },
            CategorySpec {
                name: "API",
                strong: &["openapi", "swagger", "api gateway", "rest api", "graphql", "payment gateway", "api documentation"],
                weak: &["api", "endpoint", "request", "response", "authorization", "bearer", "status code", "parameters"],
            },
            CategorySpec {
                name: "Security",
                strong: &["jwt", "oauth", "tls", "encryption", "firewall", "vulnerability", "certificate rotation"],
                weak: &["certificate", "token", "auth", "security", "rotation"],
            },
            CategorySpec {
                name: "Mobile",
                strong: &["android", "ios", "apk", "ipa", "mobile app"],
                weak: &["mobile", "app store", "build"],
            },
            CategorySpec {
                name: "Cloud",
                strong: &["aws", "lambda", "s3", "iam", "azure", "gcp", "cloud storage"],
                weak: &["cloud", "bucket", "policy", "region"],
            },
        ],
    },
    DomainSpec {
        name: "Education",
        strong: &[
            "machine learning", "neural network", "deep learning", "numpy", "pandas", "tensorflow",
            "pytorch", "calculus", "algebra", "geometry", "statistics", "physics", "chemistry",
            "biology", "lecture", "syllabus", "tutorial", "curriculum",
        ],
        weak: &[
            "assignment", "homework", "study", "notes", "learning", "model", "training", "lab",
            "experiment", "science", "math", "mathematics", "chapter", "problem",
            "probability", "theory", "supervised", "cnn", "lstm", "dataset",
        ],
        categories: &[
            CategorySpec {
                name: "DataScience",
                strong: &["machine learning", "neural network", "deep learning", "numpy", "pandas", "tensorflow", "pytorch", "scikit learn"],
                weak: &["dataset", "model", "training", "supervised", "cnn", "lstm", "regression", "data science"],
            },
            CategorySpec {
                name: "Mathematics",
                strong: &["calculus", "algebra", "geometry", "trigonometry", "probability", "statistics", "theorem"],
                weak: &["equation", "problem", "proof", "math", "formula"],
            },
            CategorySpec {
                name: "Science",
                strong: &["physics", "chemistry", "biology", "lab experiment"],
                weak: &["science", "lab", "experiment", "molecule", "cell", "energy"],
            },
            CategorySpec {
                name: "CourseMaterial",
                strong: &["lecture", "syllabus", "tutorial", "curriculum", "course outline", "lecture notes"],
                weak: &["notes", "chapter", "module", "study", "reading"],
            },
        ],
    },
    DomainSpec {
        name: "Finance",
        strong: &[
            "balance sheet", "budget", "revenue", "profit", "accounting", "payroll", "salary", "tax",
            "forecast", "dividend", "portfolio", "stock", "investment", "roi", "audit", "ledger",
            "expense", "fiscal", "quarterly", "financial statement",
        ],
        weak: &[
            "cost", "price", "payment", "loss", "income", "wage", "compensation", "benefits",
            "deduction", "capital", "interest", "bank", "loan", "fund", "asset", "upkeep",
            "maintenance", "repair", "amount", "total", "finance",
        ],
        categories: &[
            CategorySpec {
                name: "Accounting",
                strong: &["balance sheet", "accounting", "ledger", "audit", "revenue", "quarterly", "financial statement", "profit"],
                weak: &["income", "asset", "liabilities", "loss"],
            },
            CategorySpec {
                name: "Budgeting",
                strong: &["budget", "forecast", "allocation", "fiscal year"],
                weak: &["plan", "expense", "spending", "approved"],
            },
            CategorySpec {
                name: "Payroll",
                strong: &["payroll", "salary", "wage", "compensation"],
                weak: &["benefits", "deduction", "bonus", "employee"],
            },
            CategorySpec {
                name: "Investment",
                strong: &["portfolio", "dividend", "stock", "roi", "investment", "mutual fund"],
                weak: &["shares", "return", "market"],
            },
            CategorySpec {
                name: "Tax",
                strong: &["tax", "irs", "gst", "tax filing", "tax return"],
                weak: &["deduction", "filing", "refund"],
            },
            CategorySpec {
                name: "Maintenance",
                strong: &["maintenance", "repair", "upkeep", "capital expense"],
                weak: &["cost", "expense"],
            },
        ],
    },
    DomainSpec {
        name: "Healthcare",
        strong: &[
            "patient", "diagnosis", "hospital", "clinic", "prescription", "pathology", "laboratory",
            "hemoglobin", "cholesterol", "mri", "treatment", "doctor", "symptoms", "medicine",
            "surgery", "medical", "blood",
        ],
        weak: &["health", "report", "result", "dose", "ward", "icu", "pain", "reference range", "therapy", "care", "age", "sex"],
        categories: &[
            CategorySpec {
                name: "LabReport",
                strong: &["blood count", "hemoglobin", "cholesterol", "pathology", "lipid profile", "lab report", "cbc", "platelet"],
                weak: &["reference range", "sample", "result", "units", "laboratory"],
            },
            CategorySpec {
                name: "Clinical",
                strong: &["diagnosis", "admission form", "surgery", "treatment protocol", "discharge summary", "consent"],
                weak: &["patient", "ward", "icu", "symptoms", "complaint", "doctor"],
            },
            CategorySpec {
                name: "Prescription",
                strong: &["prescription", "dosage", "tablet", "rx", "pharmacy"],
                weak: &["dose", "daily", "medicine"],
            },
            CategorySpec {
                name: "Imaging",
                strong: &["mri", "ct scan", "x ray", "ultrasound", "radiology"],
                weak: &["scan", "image"],
            },
            CategorySpec {
                name: "Insurance",
                strong: &["health insurance", "insurance claim", "policy number", "premium"],
                weak: &["coverage", "insurer", "claim"],
            },
        ],
    },
    DomainSpec {
        name: "Legal",
        strong: &[
            "contract", "agreement", "clause", "jurisdiction", "non-disclosure", "nda", "governing law",
            "plaintiff", "defendant", "court", "affidavit", "liability", "indemnity", "whereas",
            "hereinafter", "licensor", "licensee",
        ],
        weak: &[
            "law", "legal", "obligations", "witness", "signature", "parties", "party", "term",
            "breach", "compliance", "dispute", "hereby",
        ],
        categories: &[
            CategorySpec {
                name: "Contract",
                strong: &["contract", "agreement", "clause", "nda", "non-disclosure", "indemnity", "governing law", "confidential information"],
                weak: &["parties", "party", "term", "obligations"],
            },
            CategorySpec {
                name: "Litigation",
                strong: &["court", "plaintiff", "defendant", "lawsuit", "petition", "judgment", "affidavit"],
                weak: &["case", "hearing", "appeal"],
            },
            CategorySpec {
                name: "Compliance",
                strong: &["compliance", "regulation", "gdpr", "regulatory"],
                weak: &["audit", "policy"],
            },
            CategorySpec {
                name: "Property",
                strong: &["lease", "leave and license", "licensor", "licensee", "landlord", "tenant", "rent agreement"],
                weak: &["rent", "deposit", "premises"],
            },
        ],
    },
    DomainSpec {
        name: "Government",
        strong: &[
            "aadhaar", "passport", "pan card", "government of india", "uidai", "identity card",
            "driving licence", "voter id", "citizenship", "visa", "ration card", "unique identification",
        ],
        weak: &["identity", "government", "authority", "dob", "address", "kyc", "verification", "official", "gender"],
        categories: &[
            CategorySpec {
                name: "ID",
                strong: &["aadhaar", "passport", "pan card", "voter id", "identity card", "driving licence", "uidai"],
                weak: &["identity", "dob", "kyc", "gender"],
            },
            CategorySpec {
                name: "Certificates",
                strong: &["birth certificate", "domicile certificate", "income certificate", "caste certificate"],
                weak: &["certificate", "issued"],
            },
            CategorySpec {
                name: "Permits",
                strong: &["visa", "work permit", "license application"],
                weak: &["application", "permit"],
            },
        ],
    },
    DomainSpec {
        name: "Personal",
        strong: &[
            "invoice", "receipt", "bill", "warranty", "itinerary", "hotel", "booking", "trip",
            "vacation", "utility bill", "resume", "grocery", "recipe",
        ],
        weak: &["purchase", "paid", "order", "travel", "holiday", "family", "personal", "home", "shopping", "check-in", "flight"],
        categories: &[
            CategorySpec {
                name: "Bills",
                strong: &["invoice", "receipt", "bill", "warranty", "tax invoice", "gstin", "utility bill", "electricity bill"],
                weak: &["purchase", "paid", "total", "order", "seller", "buyer", "qty"],
            },
            CategorySpec {
                name: "Travel",
                strong: &["itinerary", "hotel", "booking", "trip", "boarding pass", "vacation"],
                weak: &["travel", "holiday", "tour", "check-in", "flight", "airline"],
            },
            CategorySpec {
                name: "Housing",
                strong: &["rent", "rental", "apartment", "maintenance charges", "house rent"],
                weak: &["deposit", "flat", "property", "electricity"],
            },
            CategorySpec {
                name: "Career",
                strong: &["resume", "curriculum vitae", "cover letter", "offer letter"],
                weak: &["experience", "skills", "references"],
            },
        ],
    },
    DomainSpec {
        name: "Company",
        strong: &[
            "roadmap", "product requirements", "marketing", "campaign", "board meeting",
            "meeting minutes", "stakeholder", "kpi", "business strategy", "statement of work", "sow",
            "deliverables", "ceo", "cto", "cfo", "recruitment", "onboarding", "brand",
        ],
        weak: &[
            "team", "company", "business", "project", "client", "strategy", "market", "feature",
            "release", "agenda", "action items", "management", "operations", "vendor", "proposal",
            "specification", "department",
        ],
        categories: &[
            CategorySpec {
                name: "Product",
                strong: &["roadmap", "product requirements", "prd", "feature spec", "release plan", "product roadmap"],
                weak: &["feature", "release", "specification", "development"],
            },
            CategorySpec {
                name: "Marketing",
                strong: &["marketing", "campaign", "advertisement", "brand", "promotion", "seo"],
                weak: &["audience", "social media", "ads"],
            },
            CategorySpec {
                name: "Meetings",
                strong: &["meeting minutes", "board meeting", "agenda", "action items", "attendees"],
                weak: &["decisions", "discussed", "meeting"],
            },
            CategorySpec {
                name: "Strategy",
                strong: &["business strategy", "market analysis", "kpi", "swot", "okr"],
                weak: &["growth", "market", "competitor"],
            },
            CategorySpec {
                name: "HR",
                strong: &["recruitment", "onboarding", "employee handbook", "performance review", "hr policy"],
                weak: &["hiring", "training", "leave"],
            },
            CategorySpec {
                name: "Service",
                strong: &["statement of work", "sow", "deliverables", "milestones", "service agreement"],
                weak: &["client", "vendor", "scope"],
            },
            CategorySpec {
                name: "Finance",
                strong: &["budget allocation", "cfo", "expenditure", "department heads"],
                weak: &["approved", "utilization"],
            },
        ],
    },
    DomainSpec {
        name: "College",
        strong: &[
            "university", "college", "campus", "dormitory", "scholarship", "degree", "semester",
            "bonafide", "fraternity", "sorority", "alumni", "gpa", "transcript", "dean",
        ],
        weak: &["student", "academic", "club", "event", "hostel", "faculty", "roll number", "enrollment", "exam", "principal"],
        categories: &[
            CategorySpec {
                name: "Admin",
                strong: &["bonafide", "transcript", "enrollment", "admission letter", "fee receipt", "student id"],
                weak: &["certificate", "principal", "roll number"],
            },
            CategorySpec {
                name: "Academics",
                strong: &["semester", "gpa", "credits", "course registration", "thesis"],
                weak: &["lecture", "grade", "exam", "professor"],
            },
            CategorySpec {
                name: "CampusLife",
                strong: &["dormitory", "hostel", "fraternity", "sorority", "campus event", "student club"],
                weak: &["event", "sports", "festival", "club"],
            },
            CategorySpec {
                name: "FinancialAid",
                strong: &["scholarship", "financial aid", "tuition", "student loan"],
                weak: &["fee", "grant"],
            },
        ],
    },
    DomainSpec {
        name: "School",
        strong: &[
            "elementary school", "school", "classroom", "teacher", "worksheet", "report card",
            "leaving certificate", "pupil", "kindergarten", "ssc", "cbse", "question paper",
        ],
        weak: &["homework", "class", "project", "due", "exam", "examination", "marks", "parent", "principal", "subject", "section", "grade", "std"],
        categories: &[
            CategorySpec {
                name: "Academic",
                strong: &["worksheet", "question paper", "examination", "report card", "homework", "annual examination"],
                weak: &["subject", "section", "answer", "solve", "marks", "chapter"],
            },
            CategorySpec {
                name: "Admin",
                strong: &["leaving certificate", "admission form", "pupil", "general register", "transfer certificate"],
                weak: &["conduct", "progress", "date of birth", "admission"],
            },
            CategorySpec {
                name: "Activities",
                strong: &["field trip", "annual day", "sports day", "science fair"],
                weak: &["event", "competition"],
            },
        ],
    },
    DomainSpec {
        name: "ResearchPaper",
        strong: &[
            "abstract", "methodology", "doi", "arxiv", "literature review", "hypothesis", "peer review",
            "journal", "conference paper", "et al", "research paper",
        ],
        weak: &["results", "experiment", "evaluation", "baseline", "accuracy", "proposed", "study", "analysis", "findings", "references", "citation"],
        categories: &[
            CategorySpec {
                name: "Paper",
                strong: &["abstract", "doi", "arxiv", "et al", "journal", "conference paper", "research paper"],
                weak: &["references", "baseline", "citation"],
            },
            CategorySpec {
                name: "Thesis",
                strong: &["thesis", "dissertation", "supervisor", "viva"],
                weak: &["chapter", "defense"],
            },
            CategorySpec {
                name: "Proposal",
                strong: &["research proposal", "grant proposal", "funding request", "specific aims"],
                weak: &["budget", "timeline", "objectives"],
            },
        ],
    },
];

//! Fixed value tables the synthetic result generator draws from.

pub const RISK_FACTORS: [&str; 15] = [
    "Broken Object-Level Authorization (BOLA)",
    "Broken User Authentication",
    "Excessive Data Exposure",
    "Lack of Resources & Rate Limiting",
    "Broken Function-Level Authorization",
    "Mass Assignment",
    "Security Misconfiguration",
    "Injection",
    "Improper Assets Management",
    "Internet Exposure",
    "Sensitive Data Exposure",
    "Deprecated or Zombie APIs",
    "Documentation Completeness",
    "Authentication and Authorization Gaps",
    "Rate Limiting and Abuse Protection",
];

pub const FRAMEWORKS: [&str; 5] = ["Django", "Express", "Spring Boot", "Flask", "Laravel"];

pub const RESOURCES: [&str; 5] = ["users", "orders", "payments", "products", "inventory"];

pub const SUBDOMAINS: [&str; 3] = ["api", "orders", "payments"];

pub const DOMAIN_API_TYPES: [&str; 2] = ["JSON-API", "HTML WEB"];

pub const PLACEHOLDER_API_TYPES: [&str; 3] = ["REST", "GraphQL", "SOAP"];

pub const PLACEHOLDER_DOMAIN: &str = "example.com";

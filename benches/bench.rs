// Criterion benchmarks for SkillMatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skillmatch::core::{
    filters::{matched_skills, skill_keys},
    Matcher,
};
use skillmatch::models::JobPosting;

const SKILL_POOL: &[&str] = &[
    "React", "JavaScript", "CSS", "HTML", "Node.js", "SQL", "Java", "Spring", "Maven",
    "PostgreSQL", "MySQL", "Python", "TypeScript", "Redux", "GraphQL", "Docker", "Go",
    "Kubernetes", "Rust", "MongoDB",
];

fn create_posting(id: usize) -> JobPosting {
    let required_skills = (0..4)
        .map(|offset| SKILL_POOL[(id * 3 + offset * 7) % SKILL_POOL.len()].to_string())
        .collect();

    JobPosting {
        id: id.to_string(),
        title: format!("Job {}", id),
        company: "TechCorp".to_string(),
        location: "Remote".to_string(),
        salary_range: None,
        job_type: "Full-time".to_string(),
        description: String::new(),
        required_skills,
        is_active: true,
        created_at: None,
    }
}

fn user_skills() -> Vec<String> {
    ["java", "SQL", "react", "Docker", "rust"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn bench_skill_keys(c: &mut Criterion) {
    let skills = user_skills();

    c.bench_function("skill_keys", |b| {
        b.iter(|| skill_keys(black_box(&skills)));
    });
}

fn bench_intersection(c: &mut Criterion) {
    let keys = skill_keys(user_skills());
    let posting = create_posting(1);

    c.bench_function("matched_skills_single_posting", |b| {
        b.iter(|| matched_skills(black_box(&keys), black_box(&posting.required_skills)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::default();
    let skills = user_skills();

    let mut group = c.benchmark_group("matching");

    for posting_count in [10, 100, 1000, 10_000].iter() {
        let postings: Vec<JobPosting> = (0..*posting_count).map(create_posting).collect();

        group.bench_with_input(
            BenchmarkId::new("find_matches", posting_count),
            posting_count,
            |b, _| {
                b.iter(|| matcher.find_matches(black_box(&skills), black_box(&postings)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_skill_keys, bench_intersection, bench_matching);

criterion_main!(benches);

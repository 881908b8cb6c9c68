//! Integration tests for commit message synthesis.

use commitwatch::commit::{build_commit_message, categorize, extract_insights};
use commitwatch::{Change, CommitType, Insights};

fn changes(records: &[(&str, &str)]) -> Vec<Change> {
    records
        .iter()
        .map(|(code, path)| Change::from_code(code, *path))
        .collect()
}

fn synthesize(records: &[(&str, &str)], diff: &str) -> String {
    build_commit_message(&changes(records), &extract_insights(diff))
        .expect("non-empty changes")
        .format()
}

#[test]
fn test_documented_scenarios() {
    let cases = vec![
        (
            vec![("??", "src/components/Button.tsx")],
            "+export function Button() {",
            "feat(components): add Button",
        ),
        (vec![("M", "utils/math.ts")], "", "feat(utils): update math"),
        (vec![("D", "old/legacy.ts")], "", "refactor: remove legacy"),
        (vec![("M", "README.md")], "", "docs(docs): update README"),
    ];

    for (records, diff, expected) in cases {
        assert_eq!(synthesize(&records, diff), expected, "Failed for {:?}", records);
    }
}

#[test]
fn test_pure_additions_are_always_feat() {
    let sets = vec![
        vec![("??", "docs/guide.md")],
        vec![("A", "styles/theme.css")],
        vec![("??", "src/bugfix.ts"), ("A", "package.json")],
        vec![("??", "a.md"), ("D", "b.md")],
        vec![("??", "notes.md"), ("AM", "x.css")],
    ];

    for records in sets {
        let msg = build_commit_message(&changes(&records), &Insights::default()).unwrap();
        assert_eq!(msg.commit_type, CommitType::Feat, "Failed for {:?}", records);
    }
}

#[test]
fn test_pure_deletions_are_always_refactor() {
    let sets = vec![
        vec![("D", "README.md")],
        vec![("D", "src/fix.ts"), ("D", "styles/a.css")],
        vec![("D", "package.json"), ("R", "x.ts")],
    ];

    for records in sets {
        let msg = build_commit_message(&changes(&records), &Insights::default()).unwrap();
        assert_eq!(msg.commit_type, CommitType::Refactor, "Failed for {:?}", records);
    }
}

#[test]
fn test_fix_or_bug_in_any_path_overrides_category_typing() {
    let sets = vec![
        vec![("M", "README.md"), ("M", "src/FixTimer.ts")],
        vec![("M", "styles/bug-colors.css")],
        vec![("M", "package.json"), ("??", "debug/BUGS.txt")],
    ];

    for records in sets {
        let msg = build_commit_message(&changes(&records), &Insights::default()).unwrap();
        assert_eq!(msg.commit_type, CommitType::Fix, "Failed for {:?}", records);
    }
}

#[test]
fn test_scope_present_iff_any_path_is_categorized() {
    let sets: Vec<Vec<(&str, &str)>> = vec![
        vec![("M", "Makefile")],
        vec![("M", "Makefile"), ("M", "src/main.rs")],
        vec![("M", "Makefile"), ("M", "app/layout.tsx"), ("M", "README.md")],
        vec![("M", "README.md"), ("M", "app/layout.tsx")],
    ];

    for records in sets {
        let msg = build_commit_message(&changes(&records), &Insights::default()).unwrap();
        let expected = records.iter().find_map(|(_, path)| categorize(path));
        assert_eq!(msg.scope, expected, "Failed for {:?}", records);
        assert_eq!(msg.format().contains('('), expected.is_some());
    }
}

#[test]
fn test_remove_clause_follows_first_clause() {
    assert_eq!(
        synthesize(
            &[("??", "src/components/Leaf.tsx"), ("M", "src/a.ts"), ("D", "src/old.ts")],
            "+export function Leaf() {",
        ),
        "feat(components): add Leaf; remove old"
    );
    assert_eq!(
        synthesize(&[("M", "src/a.ts"), ("D", "src/old.ts")], ""),
        "feat: update a; remove old"
    );
    assert_eq!(
        synthesize(&[("R", "src/x.ts"), ("D", "src/old.ts")], "+interface Ignored {"),
        "refactor: remove old"
    );
}

#[test]
fn test_hook_and_component_patterns_from_real_diff() {
    let diff = "\
diff --git a/hooks/use-gamification.ts b/hooks/use-gamification.ts
index 1111111..2222222 100644
--- a/hooks/use-gamification.ts
+++ b/hooks/use-gamification.ts
@@ -1,4 +1,12 @@
 import { useState } from 'react';
+import { useConfetti } from './use-confetti';
+
+export interface Streak {
+  days: number;
+}
+
+export const useGamification = (initial: number) => {
+  const [xp, setXp] = useState(initial);
";
    let insights = extract_insights(diff);
    assert_eq!(insights.added_functions, vec!["useGamification"]);
    assert_eq!(insights.key_changes, vec!["interface Streak"]);
    assert_eq!(insights.added_imports, vec!["./use-confetti"]);

    assert_eq!(
        synthesize(&[("M", "hooks/use-gamification.ts")], diff),
        "feat(hooks): add useGamification"
    );
}

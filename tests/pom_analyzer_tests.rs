// tests/pom_analyzer_tests.rs
use pomassert::check::{Checker, DependencyScope};
use pomassert::document::parser::parse_xml;
use pomassert::error::CheckError;

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <dependencies>
        <dependency>
            <groupId>org.junit.jupiter</groupId>
            <artifactId>junit-jupiter</artifactId>
            <scope>test</scope>
        </dependency>
        <dependency>
            <groupId>org.slf4j</groupId>
            <artifactId>slf4j-api</artifactId>
        </dependency>
    </dependencies>
    <build>
        <plugins>
            <plugin>
                <groupId>com.diffplug.spotless</groupId>
                <artifactId>spotless-maven-plugin</artifactId>
                <executions>
                    <execution>
                        <phase>compile</phase>
                        <goals>
                            <goal>check</goal>
                        </goals>
                    </execution>
                </executions>
            </plugin>
            <plugin>
                <groupId>org.apache.maven.plugins</groupId>
                <artifactId>maven-surefire-plugin</artifactId>
                <executions>
                    <execution>
                        <id>unit</id>
                        <phase>test</phase>
                        <goals>
                            <goal>test</goal>
                        </goals>
                    </execution>
                    <execution>
                        <id>report</id>
                        <phase>verify</phase>
                        <goals>
                            <goal>report</goal>
                            <goal>aggregate</goal>
                        </goals>
                    </execution>
                </executions>
            </plugin>
        </plugins>
    </build>
</project>"#;

fn checker() -> Checker {
    Checker::from_tree(&parse_xml(POM).unwrap())
}

fn report(result: Result<(), CheckError>) -> String {
    result
        .unwrap_err()
        .as_validation()
        .map(|failure| failure.report().to_string())
        .unwrap_or_default()
}

// ============================================================================
// Plugin executions
// ============================================================================

#[test]
fn test_plugin_with_single_execution() {
    let result = checker()
        .checking("build.plugins")
        .should()
        .have_plugin_execution_in_phase_for_goal("spotless-maven-plugin", "compile", "check")
        .unwrap()
        .validate();
    assert!(result.is_ok());
}

#[test]
fn test_plugin_with_listed_executions_and_goals() {
    let checker = checker();
    for (phase, goal) in [("test", "test"), ("verify", "report"), ("verify", "aggregate")] {
        let result = checker
            .checking("build.plugins")
            .should()
            .have_plugin_execution_in_phase_for_goal("maven-surefire-plugin", phase, goal)
            .unwrap()
            .validate();
        assert!(result.is_ok(), "phase {} goal {}", phase, goal);
    }
}

#[test]
fn test_plugin_missing_in_phase() {
    let message = report(
        checker()
            .checking("build.plugins")
            .should()
            .have_plugin_execution_in_phase_for_goal("spotless-maven-plugin", "test", "test")
            .unwrap()
            .validate(),
    );
    assert_eq!(
        message,
        "Error(s) occurred:\nPlugin 'spotless-maven-plugin' not found in given phase 'test' for goal 'test'\n"
    );
}

#[test]
fn test_phase_and_goal_belong_to_named_plugin() {
    // surefire runs `test` in `test`; spotless does not
    let result = checker()
        .checking("build.plugins")
        .should_not()
        .have_plugin_execution_in_phase_for_goal("spotless-maven-plugin", "test", "test")
        .unwrap()
        .validate();
    assert!(result.is_ok());
}

#[test]
fn test_phase_and_goal_must_share_an_execution() {
    let result = checker()
        .checking("build.plugins")
        .should()
        .have_plugin_execution_in_phase_for_goal("maven-surefire-plugin", "test", "aggregate")
        .unwrap()
        .validate();
    assert!(result.is_err());
}

#[test]
fn test_disallowed_plugin_execution() {
    let message = report(
        checker()
            .checking("build")
            .should_not()
            .have_plugin_execution_in_phase_for_goal("maven-surefire-plugin", "verify", "aggregate")
            .unwrap()
            .validate(),
    );
    assert!(message.contains(
        "Plugin 'maven-surefire-plugin' found in phase 'verify' for goal 'aggregate' where this is not permitted"
    ));
}

#[test]
fn test_plugin_outside_given_node_is_ignored() {
    let result = checker()
        .checking("dependencies")
        .should()
        .have_plugin_execution_in_phase_for_goal("spotless-maven-plugin", "compile", "check")
        .unwrap()
        .validate();
    assert!(result.is_err());
}

#[test]
fn test_plugin_arguments_must_not_be_blank() {
    let err = checker()
        .checking("build.plugins")
        .should()
        .have_plugin_execution_in_phase_for_goal("spotless-maven-plugin", "", "check")
        .unwrap_err();
    assert_eq!(err, CheckError::InvalidArgument { name: "phase" });
}

// ============================================================================
// Dependency scopes
// ============================================================================

#[test]
fn test_dependency_with_declared_scope() {
    let result = checker()
        .checking("dependencies")
        .should()
        .have_dependency_with_scope("junit-jupiter", DependencyScope::Test)
        .unwrap()
        .validate();
    assert!(result.is_ok());
}

#[test]
fn test_dependency_without_scope_is_compile() {
    let checker = checker();
    assert!(checker
        .checking("dependencies")
        .should()
        .have_dependency_with_scope("slf4j-api", DependencyScope::default())
        .unwrap()
        .validate()
        .is_ok());

    let message = report(
        checker
            .checking("dependencies")
            .should()
            .have_dependency_with_scope("slf4j-api", DependencyScope::Test)
            .unwrap()
            .validate(),
    );
    assert_eq!(
        message,
        "Error(s) occurred:\nDependency 'slf4j-api' with scope 'test' not found in dependencies where it is required\n"
    );
}

#[test]
fn test_test_dependency_not_in_compile_scope() {
    let message = report(
        checker()
            .checking("dependencies")
            .should_not()
            .have_dependency_with_scope("junit-jupiter", DependencyScope::Test)
            .unwrap()
            .validate(),
    );
    assert!(message.contains(
        "Dependency 'junit-jupiter' found with scope 'test' in dependencies where it is not allowed"
    ));

    assert!(checker()
        .checking("dependencies")
        .should_not()
        .have_dependency_with_scope("junit-jupiter", DependencyScope::Compile)
        .unwrap()
        .validate()
        .is_ok());
}

#[test]
fn test_excluded_artifact_is_not_a_dependency() {
    let tree = parse_xml(
        r#"<project>
    <dependencies>
        <dependency>
            <artifactId>junit</artifactId>
            <scope>test</scope>
            <exclusions>
                <exclusion>
                    <groupId>org.hamcrest</groupId>
                    <artifactId>hamcrest-core</artifactId>
                </exclusion>
            </exclusions>
        </dependency>
    </dependencies>
</project>"#,
    )
    .unwrap();
    let checker = Checker::from_tree(&tree);

    let message = report(
        checker
            .checking("dependencies")
            .should()
            .have_dependency_with_scope("hamcrest-core", DependencyScope::Compile)
            .unwrap()
            .validate(),
    );
    assert!(message.contains("Dependency 'hamcrest-core' with scope 'compile' not found"));

    assert!(checker
        .checking("dependencies")
        .should()
        .have_dependency_with_scope("junit", DependencyScope::Test)
        .unwrap()
        .validate()
        .is_ok());
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_property_lookup_ignores_given_node() {
    let tree = parse_xml(
        "<project><properties><maven.compiler.release>17</maven.compiler.release></properties></project>",
    )
    .unwrap();
    let result = Checker::from_tree(&tree)
        .checking("build")
        .should()
        .have_property("compiler.release")
        .unwrap()
        .validate();
    assert!(result.is_ok());
}

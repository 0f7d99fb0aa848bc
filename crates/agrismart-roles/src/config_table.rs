//! ---
//! agri_section: "02-identity-access"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Role keys, resolution, configuration, and permissions."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
//! Static per-role navigation, KPI, and dashboard panel definitions.
//!
//! Reference data only: defined at build time, never mutated at runtime.
//! [`lookup`] is total over the closed [`Role`] enumeration; a role without
//! an entry is a build-time defect, not something this module can observe.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Sidebar navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: &'static str,
    pub route: &'static str,
    pub icon: &'static str,
}

/// Colour tone applied to a KPI card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
    Brand,
}

/// Headline indicator rendered on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiItem {
    pub label: &'static str,
    pub value: &'static str,
    pub trend: Option<&'static str>,
    pub tone: Tone,
    pub icon: &'static str,
}

/// Accent palette for dashboard panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Leaf,
    Sky,
    Amber,
    Rose,
    Indigo,
    Emerald,
}

/// Dashboard panel of list items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelItem {
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub items: &'static [&'static str],
    pub accent: Option<Accent>,
}

/// Per-role bundle of navigation, KPI, and panel definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleConfig {
    pub key: Role,
    pub label: &'static str,
    pub org_label: &'static str,
    pub nav: Vec<NavItem>,
    pub kpis: Vec<KpiItem>,
    pub panels: Vec<PanelItem>,
}

/// Retrieve the configuration bundle for a role. Total over [`Role`].
pub fn lookup(role: Role) -> &'static RoleConfig {
    match role {
        Role::Viewer => &VIEWER,
        Role::Producteur => &PRODUCTEUR,
        Role::Technicien => &TECHNICIEN,
        Role::Cooperative => &COOPERATIVE,
        Role::Ong => &ONG,
        Role::Etat => &ETAT,
        Role::Admin => &ADMIN,
    }
}

fn nav(label: &'static str, route: &'static str, icon: &'static str) -> NavItem {
    NavItem { label, route, icon }
}

fn kpi(
    label: &'static str,
    value: &'static str,
    trend: Option<&'static str>,
    tone: Tone,
    icon: &'static str,
) -> KpiItem {
    KpiItem {
        label,
        value,
        trend,
        tone,
        icon,
    }
}

fn panel(
    title: &'static str,
    subtitle: Option<&'static str>,
    items: &'static [&'static str],
    accent: Option<Accent>,
) -> PanelItem {
    PanelItem {
        title,
        subtitle,
        items,
        accent,
    }
}

static VIEWER: Lazy<RoleConfig> = Lazy::new(|| RoleConfig {
    key: Role::Viewer,
    label: "Visiteur",
    org_label: "AgriSmart",
    nav: vec![
        nav("Tableau de bord", "/app/dashboard", "dashboard"),
        nav("Marché public", "/marketplace", "market"),
    ],
    kpis: vec![
        kpi("Offres publiées", "312", Some("Cette semaine"), Tone::Info, "market"),
        kpi("Produits référencés", "86", None, Tone::Neutral, "leaf"),
    ],
    panels: vec![panel(
        "Découvrir AgriSmart",
        Some("Accès lecture seule"),
        &[
            "Parcourir les offres du marché",
            "Consulter les prix de référence",
            "Créer un compte producteur pour vendre",
        ],
        Some(Accent::Sky),
    )],
});

static PRODUCTEUR: Lazy<RoleConfig> = Lazy::new(|| RoleConfig {
    key: Role::Producteur,
    label: "Agriculteur / Producteur",
    org_label: "Exploitation Familiale",
    nav: vec![
        nav("Tableau de bord", "/app/dashboard", "dashboard"),
        nav("Dashboard IA", "/app/dashboard-ia", "cloud"),
        nav("E-learning", "/app/e-learning", "school"),
        nav("Gestion Parcelles", "/app/agri", "agri"),
        nav("Marché Agricole", "/app/market", "market"),
    ],
    kpis: vec![
        kpi("Surface cultivée", "12.5 ha", Some("+1.5 ha cette saison"), Tone::Info, "pin"),
        kpi("Récolte prévue", "145 t", Some("Est. Maïs/Blé"), Tone::Success, "leaf"),
        kpi("Cours terminés", "4/12", Some("+2 cette semaine"), Tone::Brand, "training"),
        kpi("Alertes météo", "0", Some("Aucun risque"), Tone::Neutral, "cloud"),
    ],
    panels: vec![
        panel(
            "Tâches prioritaires",
            Some("Prochains 48h"),
            &[
                "Irrigation Parcelle B · Aujourd'hui 18h",
                "Application engrais · Demain matin",
                "Récolte zone C · Jeudi",
            ],
            Some(Accent::Leaf),
        ),
        panel(
            "Cours suggérés",
            Some("Selon votre profil"),
            &[
                "Optimisation irrigation goutte-à-goutte",
                "Protection naturelle contre les nuisibles",
                "Vendre au meilleur prix sur le marché",
            ],
            Some(Accent::Indigo),
        ),
    ],
});

static TECHNICIEN: Lazy<RoleConfig> = Lazy::new(|| RoleConfig {
    key: Role::Technicien,
    label: "Technicien Agricole",
    org_label: "AgriTech Services",
    nav: vec![
        nav("Tableau de bord", "/app/dashboard", "dashboard"),
        nav("Gestion Agricole", "/app/agri", "agri"),
        nav("IA & Conseils", "/app/ai", "ai"),
        nav("Appui Technique", "/app/support", "support"),
        nav("Alertes", "/app/alerts", "alerts"),
    ],
    kpis: vec![
        kpi("Producteurs suivis", "47", Some("+3 ce mois"), Tone::Info, "users"),
        kpi("Parcelles actives", "142", Some("+8 cette semaine"), Tone::Success, "pin"),
        kpi("Diagnostics IA", "23", Some("Aujourd'hui"), Tone::Brand, "brain"),
        kpi("Interventions en cours", "8", None, Tone::Warning, "alert"),
    ],
    panels: vec![
        panel(
            "Demandes d'appui technique",
            Some("3 en attente"),
            &[
                "Ahmed Benali · Parcelle A-12 · Maladie des feuilles · Urgent",
                "Fatima Zahra · Parcelle B-05 · Problème irrigation · Moyen",
                "Ali Mansour · Parcelle C-23 · Carence nutritionnelle · Normal",
            ],
            Some(Accent::Rose),
        ),
        panel(
            "Diagnostics IA récents",
            Some("Validation requise"),
            &[
                "Tomate · Mildiou · Confiance 94% · À vérifier",
                "Blé · Rouille jaune · Confiance 87% · À vérifier",
                "Maïs · Stress hydrique · Confiance 92% · Confirmé",
            ],
            Some(Accent::Indigo),
        ),
    ],
});

static COOPERATIVE: Lazy<RoleConfig> = Lazy::new(|| RoleConfig {
    key: Role::Cooperative,
    label: "Coopérative Agricole",
    org_label: "Coopérative Agricole du Nord",
    nav: vec![
        nav("Tableau de bord", "/app/dashboard", "dashboard"),
        nav("Gestion Agricole", "/app/agri", "agri"),
        nav("Planification", "/app/planning", "calendar"),
        nav("Agro-Marché", "/app/market", "market"),
        nav("Formations", "/app/training", "training"),
        nav("Recommandations", "/app/recommendations", "auto_awesome"),
        nav("Alertes", "/app/alerts", "alerts"),
        nav("Rapports", "/app/rapports", "reports"),
    ],
    kpis: vec![
        kpi("Membres actifs", "156", Some("+12 ce mois"), Tone::Info, "users"),
        kpi("Production totale", "3,290 t", Some("Ce mois"), Tone::Success, "leaf"),
        kpi("Chiffre d'affaires", "2.4M", Some("+18% vs mois dernier"), Tone::Brand, "trend"),
        kpi("Événements planifiés", "8", Some("Ce mois"), Tone::Warning, "calendar"),
    ],
    panels: vec![
        panel(
            "Évolution de la production",
            Some("6 derniers mois"),
            &["Blé +12%", "Tomate +8%", "Maïs +6%"],
            Some(Accent::Emerald),
        ),
        panel(
            "Ventes par produit",
            Some("Top 4"),
            &["Tomates · 2.1M", "Blé · 1.7M", "Maïs · 1.2M", "Olives · 0.9M"],
            Some(Accent::Amber),
        ),
    ],
});

static ONG: Lazy<RoleConfig> = Lazy::new(|| RoleConfig {
    key: Role::Ong,
    label: "ONG / Projet Agricole",
    org_label: "AgriDev International",
    nav: vec![
        nav("Tableau de bord", "/app/dashboard", "dashboard"),
        nav("Formations", "/app/training", "training"),
        nav("E-learning", "/app/e-learning", "school"),
        nav("Analyse & Impact", "/app/impact", "impact"),
    ],
    kpis: vec![
        kpi("Bénéficiaires totaux", "2,420", Some("+15% ce trimestre"), Tone::Info, "users"),
        kpi("Projets actifs", "12", Some("Dans 5 régions"), Tone::Success, "pin"),
        kpi("Formations dispensées", "48", Some("+8 ce mois"), Tone::Brand, "training"),
        kpi("Taux de réussite", "87%", Some("Indicateur global"), Tone::Warning, "trend"),
    ],
    panels: vec![
        panel(
            "Bénéficiaires par région",
            Some("Nord, Sud, Est, Ouest, Centre"),
            &[
                "Nord · 420",
                "Sud · 680",
                "Est · 310",
                "Ouest · 540",
                "Centre · 390",
            ],
            Some(Accent::Emerald),
        ),
        panel(
            "Répartition budget",
            Some("Programmes 2026"),
            &[
                "Formations · 32%",
                "Irrigation · 28%",
                "Accompagnement · 22%",
                "Innovation · 18%",
            ],
            Some(Accent::Sky),
        ),
    ],
});

static ETAT: Lazy<RoleConfig> = Lazy::new(|| RoleConfig {
    key: Role::Etat,
    label: "Acteur Étatique",
    org_label: "Ministère Agriculture",
    nav: vec![
        nav("Tableau de bord", "/app/dashboard", "dashboard"),
        nav("Analyse & Impact", "/app/impact", "impact"),
        nav("Communications", "/app/communications", "report"),
        nav("Exports décision", "/app/exports-decision", "download"),
    ],
    kpis: vec![
        kpi("Alertes nationales", "18", Some("Dernières 48h"), Tone::Danger, "alert"),
        kpi("Indice de rendement", "74%", Some("+2% QoQ"), Tone::Info, "trend"),
        kpi("Risque climatique", "Modéré", Some("Mise à jour 12h"), Tone::Warning, "cloud"),
        kpi("Actions politiques", "6", Some("En validation"), Tone::Brand, "flag"),
    ],
    panels: vec![
        panel(
            "Statistiques agrégées",
            Some("Comparaison annuelle"),
            &[
                "Production céréales +4%",
                "Irrigation +6%",
                "Exportations +3%",
            ],
            Some(Accent::Amber),
        ),
        panel(
            "Communications officielles",
            Some("À publier"),
            &[
                "Alerte sécheresse · Draft",
                "Programme subvention · En revue",
                "Campagne phytosanitaire · Prêt",
            ],
            Some(Accent::Rose),
        ),
    ],
});

static ADMIN: Lazy<RoleConfig> = Lazy::new(|| RoleConfig {
    key: Role::Admin,
    label: "Administrateur Système",
    org_label: "AgriSmart Cloud",
    nav: vec![
        nav("Tableau de bord", "/app/dashboard", "dashboard"),
        nav("Administration", "/app/admin", "admin"),
        nav("E-learning", "/app/e-learning", "school"),
        nav("IoT & Passerelles", "/app/iot", "iot"),
        nav("Logs & Audit", "/app/logs", "logs"),
        nav("Modèles IA", "/app/modeles-ia", "ai"),
    ],
    kpis: vec![
        kpi("Utilisateurs actifs", "1,824", Some("+6% ce mois"), Tone::Info, "users"),
        kpi("Capteurs en ligne", "4,912", Some("98.2% uptime"), Tone::Success, "iot"),
        kpi("Alertes sécurité", "3", Some("24h"), Tone::Danger, "alert"),
        kpi("Latence moyenne", "1.2s", Some("Sous seuil"), Tone::Brand, "speed"),
    ],
    panels: vec![
        panel(
            "Audit & Conformité",
            Some("Derniers événements"),
            &[
                "RBAC mis à jour · 2h",
                "Modèle IA v3.2 publié · 6h",
                "Passerelle NW-12 redémarrée · 9h",
            ],
            Some(Accent::Indigo),
        ),
        panel(
            "Santé du système",
            Some("Services critiques"),
            &["MQTTS · OK", "API REST · OK", "Base temporelle · OK"],
            Some(Accent::Emerald),
        ),
    ],
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_total_with_non_empty_navigation() {
        for role in Role::ALL {
            let config = lookup(role);
            assert_eq!(config.key, role);
            assert!(!config.nav.is_empty(), "nav empty for {role}");
            assert!(!config.label.is_empty());
        }
    }

    #[test]
    fn every_nav_route_is_absolute() {
        for role in Role::ALL {
            for item in &lookup(role).nav {
                assert!(item.route.starts_with('/'), "{}", item.route);
            }
        }
    }

    #[test]
    fn admin_navigation_includes_administration() {
        assert!(lookup(Role::Admin)
            .nav
            .iter()
            .any(|item| item.route == "/app/admin"));
    }
}
